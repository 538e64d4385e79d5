use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::IndoorMeasurements;

/// Simplified three-band status used for the table and detail badges.
/// Ordered: Good < So-so < Bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AirStatus {
    Good,
    #[serde(rename = "So-so")]
    SoSo,
    Bad,
}

impl AirStatus {
    pub fn emoji(self) -> &'static str {
        match self {
            AirStatus::Good => "😊",
            AirStatus::SoSo => "😐",
            AirStatus::Bad => "😭",
        }
    }

    /// Emoji used in the comparison output, where So-so reads as neutral.
    pub fn category_emoji(self) -> &'static str {
        match self {
            AirStatus::Good => "🙂",
            AirStatus::SoSo => "😐",
            AirStatus::Bad => "🙁",
        }
    }
}

impl fmt::Display for AirStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AirStatus::Good => "Good",
            AirStatus::SoSo => "So-so",
            AirStatus::Bad => "Bad",
        })
    }
}

/// Outdoor AQI classification on the six-band scale used by the advisory
/// matrix. Note the band edges deliberately disagree with the three-band
/// `AirStatus` scale (100/150 mean different things on each); both ladders
/// are part of the external contract and stay as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutdoorCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive")]
    UnhealthyForSensitive,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl OutdoorCategory {
    pub fn emoji(self) -> &'static str {
        match self {
            OutdoorCategory::Good => "🙂",
            OutdoorCategory::Moderate | OutdoorCategory::UnhealthyForSensitive => "😐",
            _ => "🙁",
        }
    }
}

impl fmt::Display for OutdoorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutdoorCategory::Good => "Good",
            OutdoorCategory::Moderate => "Moderate",
            OutdoorCategory::UnhealthyForSensitive => "Unhealthy for Sensitive",
            OutdoorCategory::Unhealthy => "Unhealthy",
            OutdoorCategory::VeryUnhealthy => "Very Unhealthy",
            OutdoorCategory::Hazardous => "Hazardous",
        })
    }
}

/// Classify an AQI value on the six-band outdoor scale (inclusive upper bounds).
pub fn outdoor_category(aqi: i64) -> OutdoorCategory {
    match aqi {
        ..=50 => OutdoorCategory::Good,
        51..=100 => OutdoorCategory::Moderate,
        101..=150 => OutdoorCategory::UnhealthyForSensitive,
        151..=200 => OutdoorCategory::Unhealthy,
        201..=300 => OutdoorCategory::VeryUnhealthy,
        _ => OutdoorCategory::Hazardous,
    }
}

fn aqi_status(aqi: i64) -> AirStatus {
    if aqi > 150 {
        AirStatus::Bad
    } else if aqi > 100 {
        AirStatus::SoSo
    } else {
        AirStatus::Good
    }
}

fn pm25_status(pm25: Option<f64>) -> AirStatus {
    match pm25 {
        Some(v) if v >= 35.0 => AirStatus::Bad,
        Some(v) if v >= 12.0 => AirStatus::SoSo,
        _ => AirStatus::Good,
    }
}

/// Badge status for a station: the worse of the AQI-derived and the
/// PM2.5-derived three-band statuses. An absent PM2.5 counts as Good.
pub fn overall_status(aqi: i64, pm25: Option<f64>) -> AirStatus {
    aqi_status(aqi).max(pm25_status(pm25))
}

/// Classify the indoor measurement triple. Bad is the fallback, not a
/// disjoint third predicate: a value past the So-so upper bounds (say
/// voc = 400 with everything else at zero) lands here even though neither
/// explicit branch captures it.
pub fn indoor_category(m: IndoorMeasurements) -> AirStatus {
    if m.co2 < 800.0 && m.pm25 < 12.0 && m.voc < 150.0 {
        AirStatus::Good
    } else if (m.co2 >= 800.0 && m.co2 < 1000.0)
        || (m.pm25 >= 12.0 && m.pm25 < 35.0)
        || (m.voc >= 150.0 && m.voc <= 350.0)
    {
        AirStatus::SoSo
    } else {
        AirStatus::Bad
    }
}

/// Labelled band plus its canned advice, shown in the detail panel while no
/// indoor comparison has been requested yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdoorBriefing {
    pub category: String,
    pub recommendations: Vec<String>,
}

pub fn outdoor_briefing(aqi: i64) -> OutdoorBriefing {
    let (category, recommendations): (&str, Vec<&str>) = match aqi {
        ..=50 => (
            "Good (0-50)",
            vec!["🏃‍♂️ Enjoy the outdoors", "🪟 Open windows for fresh air"],
        ),
        51..=100 => ("Moderate (51-100)", vec!["🪟 Still ok to let some fresh air in"]),
        101..=150 => (
            "Unhealthy if Sensitive (101-150)",
            vec![
                "👀 Check to see if air gets worse",
                "😷 Kids, elderly or folks with breathing issues - mask up",
                "⏰ Limit outdoor time, especially intense exercise",
                "🚪 Close windows + doors",
            ],
        ),
        151..=200 => (
            "Unhealthy (151-200)",
            vec![
                "😷 Time to mask up outside",
                "⛔ Don't exercise or play outside",
                "🏠 Stay inside",
                "💨 Use air purifiers",
            ],
        ),
        201..=300 => (
            "Very Unhealthy (201-300)",
            vec![
                "😷 Mask up outside",
                "⚠️ 🏠 Stay indoors, close windows + doors",
                "💨 Use air purifiers",
            ],
        ),
        _ => (
            "Hazardous (301-500)",
            vec![
                "😷❗ Mask up outside",
                "⚠️ 🏠 Stay indoors, close windows + doors",
                "💨 Use air purifiers",
                "🚑 Sensitive folks may temporarily relocate per local guidance",
            ],
        ),
    };
    OutdoorBriefing {
        category: category.to_string(),
        recommendations: recommendations.into_iter().map(str::to_string).collect(),
    }
}

/// The fixed 6x3 advisory matrix. Every string is part of the user-visible
/// contract and is reproduced verbatim; this is a pure lookup.
pub fn recommendation(outdoor: OutdoorCategory, indoor: AirStatus) -> &'static str {
    use AirStatus::{Bad, Good, SoSo};
    match (outdoor, indoor) {
        (OutdoorCategory::Good, Good) => "🌎 Go anywhere, do anything",
        (OutdoorCategory::Good, SoSo) => {
            "🌳 Air is better outdoors\n🪟 Open windows + doors for fresh air\n🏃‍♂️ Healthier to exercise outside"
        }
        (OutdoorCategory::Good, Bad) => {
            "🏕️ Go outside, air is way better there\n🪟 Open as many windows + doors as you can, ventilate the space\n🏃‍♂️ Healthier to exercise outside"
        }
        (OutdoorCategory::Moderate, Good) => {
            "🚪 Close windows + doors, air is better inside than it is out there\n🏃‍♂️ Healthier to exercise indoors"
        }
        (OutdoorCategory::Moderate, SoSo) => {
            "🪟 You can still let some fresh air in but your air is not awesome anywhere"
        }
        (OutdoorCategory::Moderate, Bad) => {
            "🌳 Air is better outdoors\n🪟 Open windows + doors, ventilate the space\n🏃‍♂️ Healthier to exercise outdoors"
        }
        (OutdoorCategory::UnhealthyForSensitive, Good) => {
            "🏠 Stay indoors, your air is better inside\n🚪 Close windows + doors and keep it that way\n👶 🧓 Kids, elderly or folks with breathing issues - mask up if you go outside"
        }
        (OutdoorCategory::UnhealthyForSensitive, SoSo) => {
            "🤷‍♀️ You can still let a bit of fresh air in but your air is so-so everywhere\n👶 Kids, elderly or folks with breathing issues - mask up"
        }
        (OutdoorCategory::UnhealthyForSensitive, Bad) => {
            "🤷‍♀️ You can still let some fresh air in but your air is not so good outside either\n💨 Use air purifiers"
        }
        (OutdoorCategory::Unhealthy, Good) => {
            "🏠 Stay indoors, your air is better inside\n🚪 Close windows + doors and keep it that way\n😷 Time to mask up outside\n⛔ Don't exercise or play outside"
        }
        (OutdoorCategory::Unhealthy, SoSo) => {
            "🏠 Stay indoors, ain't great inside, but it's unhealthy outside\n💨 Use air purifiers\n🚪 Close windows + doors\n😷 Time to mask up outside\n⛔ Don't exercise or play outside"
        }
        (OutdoorCategory::Unhealthy, Bad) => {
            "🙁 Air is unhealthy everywhere\n💨 Use air purifiers, try to improve your indoor air quality\n😷 Time to mask up"
        }
        (OutdoorCategory::VeryUnhealthy, Good) => {
            "⚠️ 🏠 Stay indoors, air is way better inside\n🚪 Keep windows + doors closed\n🚫 Avoid outdoor activities\n😷 Mask up outside"
        }
        (OutdoorCategory::VeryUnhealthy, SoSo) => {
            "🏠 Stay indoors, air is better inside\n💨 Use air purifiers\n🚪 Close windows + doors\n😷 Time to mask up outside\n⛔ Don't exercise or play outside"
        }
        (OutdoorCategory::VeryUnhealthy, Bad) => {
            "⛔ Air is bad everywhere\n💨 Use air purifiers and try to improve indoor air\n😷 Mask up\n✈️ Go somewhere else if you can't clean the indoor air"
        }
        (OutdoorCategory::Hazardous, Good) => {
            "⚠️ 🏠 Stay indoors, air is way better inside\n🚪 Keep windows + doors closed\n😷❗ Mask up outside"
        }
        (OutdoorCategory::Hazardous, SoSo) => {
            "🏠 Stay indoors, air is better inside\n💨 Use air purifiers\n🚪 Close windows + doors\n😷 Time to mask up outside"
        }
        (OutdoorCategory::Hazardous, Bad) => {
            "⛔ Air is bad everywhere\n💨 Use air purifiers and try to improve indoor air\n😷 Mask up\n✈️ Go somewhere else 🚑 Especially sensitive folks may temporarily relocate per local guidance"
        }
    }
}
