use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The six pollutant codes the table knows how to sort by. The feed itself
/// may carry more; unknown codes are kept and displayed but are not sortable.
pub const POLLUTANT_CODES: [&str; 6] = ["pm25", "pm10", "o3", "no2", "so2", "co"];

/// One station reading as delivered by the feed. Immutable per fetch; the
/// whole set is replaced wholesale on reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReading {
    pub id: u64,
    pub aqi: i64,
    pub observed_at: ObservedAt,
    pub location: StationLocation,
    #[serde(default)]
    pub pollutants: BTreeMap<String, PollutantValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedAt {
    pub time: String,
    pub tz: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationLocation {
    /// Free-text "City, State/Region, Country" label. May be empty.
    #[serde(default)]
    pub label: String,
    pub detail_url: String,
    /// `[latitude, longitude]` in the feed.
    pub coordinates: (f64, f64),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PollutantValue {
    pub value: f64,
}

impl StationReading {
    /// Value of a pollutant sub-index, if the station reported it.
    pub fn pollutant(&self, code: &str) -> Option<f64> {
        self.pollutants.get(code).map(|p| p.value)
    }
}

/// The three-field indoor measurement form of the detail panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndoorMeasurements {
    pub co2: f64,
    pub pm25: f64,
    pub voc: f64,
}
