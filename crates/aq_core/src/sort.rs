use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::StationReading;

/// Sentinel used for a pollutant a station did not report. Sorts below every
/// real (non-negative) value when ascending.
const MISSING_POLLUTANT: f64 = -1.0;

/// Column the table is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Station,
    Aqi,
    /// One of the six pollutant codes (`pm25`, `pm10`, `o3`, `no2`, `so2`, `co`).
    Pollutant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// The table opens sorted by AQI ascending.
    fn default() -> Self {
        SortConfig {
            key: SortKey::Aqi,
            direction: SortDirection::Asc,
        }
    }
}

impl SortConfig {
    /// Column-header click semantics: the same key flips the direction, a
    /// different key takes over ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

fn compare(a: &StationReading, b: &StationReading, key: &SortKey) -> Ordering {
    match key {
        SortKey::Station => {
            let (la, lb) = (&a.location.label, &b.location.label);
            la.to_lowercase()
                .cmp(&lb.to_lowercase())
                .then_with(|| la.cmp(lb))
        }
        SortKey::Aqi => a.aqi.cmp(&b.aqi),
        SortKey::Pollutant(code) => {
            let va = a.pollutant(code).unwrap_or(MISSING_POLLUTANT);
            let vb = b.pollutant(code).unwrap_or(MISSING_POLLUTANT);
            va.total_cmp(&vb)
        }
    }
}

/// Order the filtered set by the given config. Returns a new sequence; the
/// source set is never mutated.
pub fn sort_readings<'a>(
    readings: &[&'a StationReading],
    config: &SortConfig,
) -> Vec<&'a StationReading> {
    let mut sorted = readings.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, &config.key);
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}
