use aq_core::{FilterSelection, country_options, state_options};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsQuery {
    /// Narrows the country option list, case-insensitively.
    #[serde(default)]
    pub country_search: String,
    /// Narrows the state option list, case-insensitively.
    #[serde(default)]
    pub state_search: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub countries: Vec<String>,
    /// Empty until a country is selected.
    pub states: Vec<String>,
    pub selected: FilterSelection,
}

/// The dropdown's option lists, derived from the loaded readings and the
/// current country selection.
pub async fn filter_options(
    State(app): State<AppState>,
    Query(query): Query<FilterOptionsQuery>,
) -> Json<FilterOptions> {
    let shared = app.shared.lock().unwrap();
    let readings = shared.dashboard.readings();
    let selected = shared.dashboard.filters().clone();
    Json(FilterOptions {
        countries: country_options(readings, &query.country_search),
        states: state_options(readings, &selected.country, &query.state_search),
        selected,
    })
}

/// Apply a country/state selection. A changed country clears any previous
/// state selection before the new state (if any) is applied.
pub async fn set_filters(
    State(app): State<AppState>,
    Json(payload): Json<FilterSelection>,
) -> Json<FilterSelection> {
    let mut shared = app.shared.lock().unwrap();
    if payload.country != shared.dashboard.filters().country {
        shared.dashboard.select_country(payload.country);
        if !payload.state.is_empty() {
            shared.dashboard.select_state(payload.state);
        }
    } else {
        shared.dashboard.select_state(payload.state);
    }
    Json(shared.dashboard.filters().clone())
}

/// "Clear all": reset both selections, widening the view back to the
/// search-only filter.
pub async fn clear_filters(State(app): State<AppState>) -> StatusCode {
    let mut shared = app.shared.lock().unwrap();
    shared.dashboard.clear_filters();
    StatusCode::NO_CONTENT
}
