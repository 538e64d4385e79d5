use aq_core::{
    AirStatus, ComparisonResult, Dashboard, FilterSelection, IndoorMeasurements, OutdoorBriefing,
    SortConfig, StationReading, extract_location_parts, outdoor_briefing, overall_status,
};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the station table, fully derived from a reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRow {
    pub id: u64,
    pub city: String,
    pub state: String,
    pub country: String,
    pub aqi: i64,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
    pub status: AirStatus,
    pub status_emoji: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantCell {
    pub code: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBadge {
    pub category: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub indoor: CategoryBadge,
    pub outdoor: CategoryBadge,
    pub recommendation: String,
}

/// The detail panel for the selected station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetail {
    pub id: u64,
    pub city: String,
    pub label: String,
    /// "lat, lon" to four decimal places.
    pub coordinates: String,
    pub map_url: String,
    pub detail_url: String,
    pub aqi: i64,
    pub status: AirStatus,
    pub status_emoji: String,
    pub pollutants: Vec<PollutantCell>,
    pub last_updated: String,
    pub measurements: IndoorMeasurements,
    /// Canned outdoor-only advice, present until a comparison is requested.
    pub briefing: Option<OutdoorBriefing>,
    pub comparison: Option<ComparisonView>,
}

/// Everything a client needs to render the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub rows: Vec<StationRow>,
    pub shown: usize,
    pub total: usize,
    pub search: String,
    pub filters: FilterSelection,
    pub sort: SortConfig,
    pub detail: Option<StationDetail>,
}

/// Render a feed timestamp for display. The feed carries naive
/// "YYYY-MM-DD HH:MM:SS" strings; RFC 3339 is accepted too, and anything
/// unparseable is shown as-is.
pub fn format_observed_at(time: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return dt.format("%b %e, %Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%b %e, %Y %H:%M").to_string();
    }
    time.to_string()
}

pub fn map_url(coordinates: (f64, f64)) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coordinates.0, coordinates.1
    )
}

fn station_row(reading: &StationReading) -> StationRow {
    let parts = extract_location_parts(&reading.location.label);
    let status = overall_status(reading.aqi, reading.pollutant("pm25"));
    StationRow {
        id: reading.id,
        city: parts.city,
        state: parts.state,
        country: parts.country,
        aqi: reading.aqi,
        pm25: reading.pollutant("pm25"),
        pm10: reading.pollutant("pm10"),
        o3: reading.pollutant("o3"),
        no2: reading.pollutant("no2"),
        so2: reading.pollutant("so2"),
        co: reading.pollutant("co"),
        status,
        status_emoji: status.emoji().to_string(),
        last_updated: format_observed_at(&reading.observed_at.time),
    }
}

fn comparison_view(result: &ComparisonResult) -> ComparisonView {
    ComparisonView {
        indoor: CategoryBadge {
            category: result.indoor.to_string(),
            emoji: result.indoor.category_emoji().to_string(),
        },
        outdoor: CategoryBadge {
            category: result.outdoor.to_string(),
            emoji: result.outdoor.emoji().to_string(),
        },
        recommendation: result.recommendation.clone(),
    }
}

fn station_detail(
    reading: &StationReading,
    measurements: IndoorMeasurements,
    comparison: Option<ComparisonResult>,
) -> StationDetail {
    let parts = extract_location_parts(&reading.location.label);
    let status = overall_status(reading.aqi, reading.pollutant("pm25"));
    let (lat, lon) = reading.location.coordinates;
    StationDetail {
        id: reading.id,
        city: parts.city,
        label: reading.location.label.clone(),
        coordinates: format!("{lat:.4}, {lon:.4}"),
        map_url: map_url(reading.location.coordinates),
        detail_url: reading.location.detail_url.clone(),
        aqi: reading.aqi,
        status,
        status_emoji: status.emoji().to_string(),
        pollutants: reading
            .pollutants
            .iter()
            .map(|(code, p)| PollutantCell {
                code: code.to_uppercase(),
                value: p.value,
            })
            .collect(),
        last_updated: format_observed_at(&reading.observed_at.time),
        measurements,
        briefing: comparison
            .is_none()
            .then(|| outdoor_briefing(reading.aqi)),
        comparison: comparison.as_ref().map(comparison_view),
    }
}

/// Derive the full page view from the dashboard state. Recomputed from
/// scratch on every request; at the expected scale (tens to low thousands of
/// stations) a linear pass is immaterial.
pub fn render(dashboard: &Dashboard) -> DashboardView {
    let visible = dashboard.visible_readings();
    let rows = visible.iter().map(|r| station_row(r)).collect();
    let detail = dashboard.selected_station().map(|station| {
        station_detail(
            station,
            dashboard.measurements(),
            dashboard.current_comparison(),
        )
    });

    DashboardView {
        shown: visible.len(),
        total: dashboard.readings().len(),
        rows,
        search: dashboard.search().to_string(),
        filters: dashboard.filters().clone(),
        sort: dashboard.sort().clone(),
        detail,
    }
}
