use serde::{Deserialize, Serialize};

use crate::models::StationReading;

/// Country/state pair selected through the filter dropdown. Empty strings mean
/// "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.country.is_empty() && self.state.is_empty()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a reading survives the search text and the country/state selection.
///
/// All three predicates are independent case-insensitive substring checks
/// against the raw location label, not the parsed parts. A country filter can
/// therefore incidentally match a state or city name; that coarse matching is
/// the intended policy.
pub fn matches(reading: &StationReading, search: &str, filters: &FilterSelection) -> bool {
    let label = &reading.location.label;
    contains_ignore_case(label, search)
        && (filters.country.is_empty() || contains_ignore_case(label, &filters.country))
        && (filters.state.is_empty() || contains_ignore_case(label, &filters.state))
}

/// Narrow the full set down to the readings that pass the current search and
/// filter selection. Always a fresh scan, nothing is cached.
pub fn filter_readings<'a>(
    readings: &'a [StationReading],
    search: &str,
    filters: &FilterSelection,
) -> Vec<&'a StationReading> {
    readings.iter().filter(|r| matches(r, search, filters)).collect()
}

fn dedup_sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values.dedup();
    values
}

/// Selectable countries: the deduplicated, sorted set of last-segment label
/// values, optionally narrowed by a case-insensitive text search.
pub fn country_options(readings: &[StationReading], narrow: &str) -> Vec<String> {
    let countries = readings
        .iter()
        .filter_map(|r| {
            r.location
                .label
                .split(',')
                .next_back()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        })
        .collect();

    dedup_sorted(countries)
        .into_iter()
        .filter(|c| contains_ignore_case(c, narrow))
        .collect()
}

/// Selectable states for the given country: second-segment values of labels
/// with at least three segments, taken from readings whose label contains the
/// selected country. The country containment here is case-sensitive, matching
/// how the dropdown has always populated.
pub fn state_options(readings: &[StationReading], country: &str, narrow: &str) -> Vec<String> {
    if country.is_empty() {
        return Vec::new();
    }

    let states = readings
        .iter()
        .filter(|r| r.location.label.contains(country))
        .filter_map(|r| {
            let parts: Vec<&str> = r.location.label.split(',').collect();
            if parts.len() > 2 {
                let state = parts[1].trim();
                (!state.is_empty()).then(|| state.to_string())
            } else {
                None
            }
        })
        .collect();

    dedup_sorted(states)
        .into_iter()
        .filter(|s| contains_ignore_case(s, narrow))
        .collect()
}
