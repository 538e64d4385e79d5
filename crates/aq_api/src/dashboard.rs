use aq_core::{DashboardError, IndoorMeasurements, POLLUTANT_CODES, SortKey};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::loader::FEED_ERROR_MESSAGE;
use crate::view::{self, DashboardView};
use crate::{AppState, ErrorResponse};

fn dashboard_error_to_response(error: DashboardError) -> impl IntoResponse {
    let (status, message) = match error {
        DashboardError::StationNotFound { id } => {
            (StatusCode::NOT_FOUND, format!("Station {id} not found"))
        }
        DashboardError::NoStationSelected => (
            StatusCode::CONFLICT,
            "No station is selected for comparison".to_string(),
        ),
    };
    (status, Json(ErrorResponse { error: message }))
}

/// Current page view, fully recomputed from the dashboard state.
pub async fn get_dashboard(State(app): State<AppState>) -> impl IntoResponse {
    let shared = app.shared.lock().unwrap();
    if shared.feed_error.is_some() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: FEED_ERROR_MESSAGE.to_string(),
            }),
        )
            .into_response();
    }
    let rendered: DashboardView = view::render(&shared.dashboard);
    Json(rendered).into_response()
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
}

pub async fn set_search(
    State(app): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> StatusCode {
    let mut shared = app.shared.lock().unwrap();
    shared.dashboard.set_search(payload.query);
    StatusCode::NO_CONTENT
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRequest {
    pub key: SortKey,
}

/// Column-header click: same key flips direction, new key sorts ascending.
/// Only the six known pollutant codes are sortable columns.
pub async fn toggle_sort(
    State(app): State<AppState>,
    Json(payload): Json<SortRequest>,
) -> impl IntoResponse {
    if let SortKey::Pollutant(code) = &payload.key {
        if !POLLUTANT_CODES.contains(&code.as_str()) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown pollutant code {code:?}"),
                }),
            )
                .into_response();
        }
    }
    let mut shared = app.shared.lock().unwrap();
    shared.dashboard.toggle_sort(payload.key);
    Json(shared.dashboard.sort().clone()).into_response()
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub id: u64,
}

/// Open the detail panel for a station. Resets the indoor measurement inputs
/// and hides any previous comparison.
pub async fn select_station(
    State(app): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> impl IntoResponse {
    let mut shared = app.shared.lock().unwrap();
    match shared.dashboard.select_station(payload.id) {
        Ok(_) => {
            let rendered = view::render(&shared.dashboard);
            Json(rendered.detail).into_response()
        }
        Err(error) => dashboard_error_to_response(error).into_response(),
    }
}

pub async fn clear_selection(State(app): State<AppState>) -> StatusCode {
    let mut shared = app.shared.lock().unwrap();
    shared.dashboard.clear_selection();
    StatusCode::NO_CONTENT
}

pub async fn set_measurements(
    State(app): State<AppState>,
    Json(payload): Json<IndoorMeasurements>,
) -> StatusCode {
    let mut shared = app.shared.lock().unwrap();
    shared.dashboard.set_measurements(payload);
    StatusCode::NO_CONTENT
}

/// Run the indoor/outdoor comparison for the selected station. The result
/// stays on display until a new station is selected.
pub async fn compare(State(app): State<AppState>) -> impl IntoResponse {
    let mut shared = app.shared.lock().unwrap();
    match shared.dashboard.compare() {
        Ok(result) => Json(result).into_response(),
        Err(error) => dashboard_error_to_response(error).into_response(),
    }
}
