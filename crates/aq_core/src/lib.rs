mod advisory;
mod filter;
mod location;
mod models;
mod sort;

pub use crate::advisory::*;
pub use crate::filter::*;
pub use crate::location::*;
pub use crate::models::*;
pub use crate::sort::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Station {id} not found in the loaded readings")]
    StationNotFound { id: u64 },
    #[error("No station is selected")]
    NoStationSelected,
}

/// Result of an indoor/outdoor comparison for the selected station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub indoor: AirStatus,
    pub outdoor: OutdoorCategory,
    pub recommendation: String,
}

/// In-memory state of the dashboard view: the loaded readings plus every
/// piece of transient UI state (search text, filter selection, sort config,
/// selected station, indoor measurement inputs). Everything derived from it
/// is recomputed on demand; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    readings: Vec<StationReading>,
    search: String,
    filters: FilterSelection,
    sort: SortConfig,
    selected: Option<u64>,
    measurements: IndoorMeasurements,
    show_comparison: bool,
}

impl Dashboard {
    pub fn new(readings: Vec<StationReading>) -> Self {
        Dashboard {
            readings,
            ..Default::default()
        }
    }

    pub fn readings(&self) -> &[StationReading] {
        &self.readings
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    pub fn measurements(&self) -> IndoorMeasurements {
        self.measurements
    }

    pub fn show_comparison(&self) -> bool {
        self.show_comparison
    }

    /// Replace the reading set wholesale (initial load or manual retry).
    /// A selection that no longer resolves is dropped.
    pub fn replace_readings(&mut self, readings: Vec<StationReading>) {
        tracing::info!("Replacing readings, {} stations loaded", readings.len());
        self.readings = readings;
        if let Some(id) = self.selected {
            if !self.readings.iter().any(|r| r.id == id) {
                self.clear_selection();
            }
        }
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    /// Selecting a country always clears the state selection.
    pub fn select_country(&mut self, country: String) {
        tracing::debug!("Country filter set to {country:?}");
        self.filters = FilterSelection {
            country,
            state: String::new(),
        };
    }

    pub fn select_state(&mut self, state: String) {
        tracing::debug!("State filter set to {state:?}");
        self.filters.state = state;
    }

    pub fn clear_filters(&mut self) {
        tracing::debug!("Clearing location filters");
        self.filters = FilterSelection::default();
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    pub fn selected_station(&self) -> Option<&StationReading> {
        self.selected
            .and_then(|id| self.readings.iter().find(|r| r.id == id))
    }

    /// Open the detail panel for a station. Selecting a station resets the
    /// indoor measurement inputs and hides any previous comparison result.
    pub fn select_station(&mut self, id: u64) -> Result<&StationReading, DashboardError> {
        if !self.readings.iter().any(|r| r.id == id) {
            return Err(DashboardError::StationNotFound { id });
        }
        tracing::info!("Selecting station {id}");
        self.selected = Some(id);
        self.measurements = IndoorMeasurements::default();
        self.show_comparison = false;
        Ok(self.selected_station().expect("selection was just validated"))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.measurements = IndoorMeasurements::default();
        self.show_comparison = false;
    }

    pub fn set_measurements(&mut self, measurements: IndoorMeasurements) {
        self.measurements = measurements;
    }

    /// Run the indoor/outdoor comparison for the selected station and keep
    /// showing the result until a new station is selected.
    pub fn compare(&mut self) -> Result<ComparisonResult, DashboardError> {
        let station = self
            .selected_station()
            .ok_or(DashboardError::NoStationSelected)?;
        let outdoor = outdoor_category(station.aqi);
        let indoor = indoor_category(self.measurements);
        self.show_comparison = true;
        tracing::info!("Comparison requested: outdoor {outdoor:?}, indoor {indoor:?}");
        Ok(ComparisonResult {
            indoor,
            outdoor,
            recommendation: recommendation(outdoor, indoor).to_string(),
        })
    }

    /// The comparison currently on display, if one has been requested since
    /// the station was selected.
    pub fn current_comparison(&self) -> Option<ComparisonResult> {
        if !self.show_comparison {
            return None;
        }
        let station = self.selected_station()?;
        let outdoor = outdoor_category(station.aqi);
        let indoor = indoor_category(self.measurements);
        Some(ComparisonResult {
            indoor,
            outdoor,
            recommendation: recommendation(outdoor, indoor).to_string(),
        })
    }

    /// Filter then sort, producing a fresh view of the reading set.
    pub fn visible_readings(&self) -> Vec<&StationReading> {
        let filtered = filter_readings(&self.readings, &self.search, &self.filters);
        sort_readings(&filtered, &self.sort)
    }
}
