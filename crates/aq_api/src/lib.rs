//! Air Quality Dashboard API
//!
//! This library exposes the dashboard over HTTP: the station table with its
//! search/filter/sort state, the detail panel, the indoor/outdoor advisory,
//! and a manual feed reload.

mod dashboard;
mod filters;
pub mod loader;
pub mod view;

use aq_core::Dashboard;
use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

/// State behind the shared mutex: the dashboard itself plus the last feed
/// failure, if any. While an error is recorded the view endpoint surfaces it
/// instead of the table.
#[derive(Debug)]
pub struct SharedState {
    pub dashboard: Dashboard,
    pub feed_error: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<Mutex<SharedState>>,
    pub client: reqwest::Client,
    pub feed_url: String,
}

impl AppState {
    pub fn new(
        feed_url: String,
        client: reqwest::Client,
        dashboard: Dashboard,
        feed_error: Option<String>,
    ) -> Self {
        AppState {
            shared: Arc::new(Mutex::new(SharedState {
                dashboard,
                feed_error,
            })),
            client,
            feed_url,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create the application router with all endpoints
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/dashboard/search", post(dashboard::set_search))
        .route("/dashboard/sort", post(dashboard::toggle_sort))
        .route("/dashboard/select", post(dashboard::select_station))
        .route("/dashboard/select/clear", post(dashboard::clear_selection))
        .route("/dashboard/measurements", post(dashboard::set_measurements))
        .route("/dashboard/compare", post(dashboard::compare))
        .route("/dashboard/filter-options", get(filters::filter_options))
        .route(
            "/dashboard/filters",
            post(filters::set_filters).delete(filters::clear_filters),
        )
        .route("/reload", post(loader::reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::{
        AirStatus, IndoorMeasurements, ObservedAt, PollutantValue, StationLocation, StationReading,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use crate::view::DashboardView;
    use serde_json::json;
    use tower::util::ServiceExt;

    fn reading(id: u64, label: &str, aqi: i64, pm25: Option<f64>) -> StationReading {
        StationReading {
            id,
            aqi,
            observed_at: ObservedAt {
                time: "2026-08-20 14:00:00".into(),
                tz: "+09:00".into(),
            },
            location: StationLocation {
                label: label.into(),
                detail_url: format!("https://aqicn.org/station/{id}"),
                coordinates: (35.6895, 139.6917),
            },
            pollutants: pm25
                .map(|value| [("pm25".to_string(), PollutantValue { value })].into())
                .unwrap_or_default(),
        }
    }

    fn test_readings() -> Vec<StationReading> {
        vec![
            reading(1, "Shinjuku, Tokyo, Japan", 74, Some(18.0)),
            reading(2, "Pasadena, California, USA", 160, None),
            reading(3, "Reykjavik, Iceland", 12, Some(4.0)),
        ]
    }

    fn test_app() -> Router {
        let state = AppState::new(
            "http://unused.invalid/feed.json".into(),
            reqwest::Client::new(),
            Dashboard::new(test_readings()),
            None,
        );
        create_app(state)
    }

    fn failed_feed_app() -> Router {
        let state = AppState::new(
            "http://unused.invalid/feed.json".into(),
            reqwest::Client::new(),
            Dashboard::default(),
            Some(loader::FEED_ERROR_MESSAGE.to_string()),
        );
        create_app(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().uri(uri).method(method);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn get_view(app: &Router) -> DashboardView {
        let (status, body) = send(app, "GET", "/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();
        let (status, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_view_default_order() {
        let app = test_app();
        let view = get_view(&app).await;
        assert_eq!(view.total, 3);
        assert_eq!(view.shown, 3);
        // AQI ascending by default.
        let aqis: Vec<i64> = view.rows.iter().map(|r| r.aqi).collect();
        assert_eq!(aqis, vec![12, 74, 160]);
        assert!(view.detail.is_none());
    }

    #[tokio::test]
    async fn test_search_narrows_the_table() {
        let app = test_app();
        let (status, _) = send(
            &app,
            "POST",
            "/dashboard/search",
            Some(json!({ "query": "tokyo" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let view = get_view(&app).await;
        assert_eq!(view.shown, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.rows[0].city, "Shinjuku");
        assert_eq!(view.search, "tokyo");
    }

    #[tokio::test]
    async fn test_sort_toggle_flips_direction() {
        let app = test_app();
        let (status, body) =
            send(&app, "POST", "/dashboard/sort", Some(json!({ "key": "aqi" }))).await;
        assert_eq!(status, StatusCode::OK);
        let config: aq_core::SortConfig = serde_json::from_slice(&body).unwrap();
        assert_eq!(config.direction, aq_core::SortDirection::Desc);

        let view = get_view(&app).await;
        let aqis: Vec<i64> = view.rows.iter().map(|r| r.aqi).collect();
        assert_eq!(aqis, vec![160, 74, 12]);
    }

    #[tokio::test]
    async fn test_sort_by_missing_pollutant_uses_sentinel() {
        let app = test_app();
        send(
            &app,
            "POST",
            "/dashboard/sort",
            Some(json!({ "key": { "pollutant": "pm25" } })),
        )
        .await;

        let view = get_view(&app).await;
        // Station 2 has no PM2.5 and sorts first ascending.
        let ids: Vec<u64> = view.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_sort_by_unknown_pollutant_is_rejected() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/dashboard/sort",
            Some(json!({ "key": { "pollutant": "xyz" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("xyz"));
    }

    #[tokio::test]
    async fn test_filter_options_and_selection_flow() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/dashboard/filter-options", None).await;
        assert_eq!(status, StatusCode::OK);
        let options: filters::FilterOptions = serde_json::from_slice(&body).unwrap();
        assert_eq!(options.countries, vec!["Iceland", "Japan", "USA"]);
        assert!(options.states.is_empty());

        let (status, body) = send(
            &app,
            "POST",
            "/dashboard/filters",
            Some(json!({ "country": "Japan", "state": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let selected: aq_core::FilterSelection = serde_json::from_slice(&body).unwrap();
        assert_eq!(selected.country, "Japan");

        let (_, body) = send(&app, "GET", "/dashboard/filter-options", None).await;
        let options: filters::FilterOptions = serde_json::from_slice(&body).unwrap();
        assert_eq!(options.states, vec!["Tokyo"]);

        let view = get_view(&app).await;
        assert_eq!(view.shown, 1);

        // Clear all: back to the full set.
        let (status, _) = send(&app, "DELETE", "/dashboard/filters", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let view = get_view(&app).await;
        assert_eq!(view.shown, 3);
    }

    #[tokio::test]
    async fn test_changing_country_resets_state_selection() {
        let app = test_app();
        send(
            &app,
            "POST",
            "/dashboard/filters",
            Some(json!({ "country": "Japan", "state": "Tokyo" })),
        )
        .await;
        let (_, body) = send(
            &app,
            "POST",
            "/dashboard/filters",
            Some(json!({ "country": "USA", "state": "" })),
        )
        .await;
        let selected: aq_core::FilterSelection = serde_json::from_slice(&body).unwrap();
        assert_eq!(selected.country, "USA");
        assert_eq!(selected.state, "");
    }

    #[tokio::test]
    async fn test_select_station_and_compare_flow() {
        let app = test_app();
        let (status, body) =
            send(&app, "POST", "/dashboard/select", Some(json!({ "id": 2 }))).await;
        assert_eq!(status, StatusCode::OK);
        let detail: Option<view::StationDetail> = serde_json::from_slice(&body).unwrap();
        let detail = detail.unwrap();
        assert_eq!(detail.city, "Pasadena");
        // No comparison yet: the outdoor-only briefing shows.
        assert_eq!(detail.briefing.unwrap().category, "Unhealthy (151-200)");

        let (status, _) = send(
            &app,
            "POST",
            "/dashboard/measurements",
            Some(json!({ "co2": 900.0, "pm25": 5.0, "voc": 10.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "POST", "/dashboard/compare", None).await;
        assert_eq!(status, StatusCode::OK);
        let result: aq_core::ComparisonResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.indoor, AirStatus::SoSo);
        assert!(!result.recommendation.is_empty());

        // The comparison is now part of the detail panel.
        let view = get_view(&app).await;
        let detail = view.detail.unwrap();
        assert!(detail.briefing.is_none());
        assert_eq!(detail.comparison.unwrap().indoor.category, "So-so");

        // Selecting a new station resets measurements and hides the result.
        send(&app, "POST", "/dashboard/select", Some(json!({ "id": 1 }))).await;
        let view = get_view(&app).await;
        let detail = view.detail.unwrap();
        assert!(detail.comparison.is_none());
        assert_eq!(detail.measurements, IndoorMeasurements::default());
    }

    #[tokio::test]
    async fn test_select_unknown_station() {
        let app = test_app();
        let (status, body) =
            send(&app, "POST", "/dashboard/select", Some(json!({ "id": 99 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("99"));
    }

    #[tokio::test]
    async fn test_compare_without_selection() {
        let app = test_app();
        let (status, body) = send(&app, "POST", "/dashboard/compare", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("selected"));
    }

    #[tokio::test]
    async fn test_failed_feed_surfaces_a_generic_error() {
        let app = failed_feed_app();
        let (status, body) = send(&app, "GET", "/dashboard", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, loader::FEED_ERROR_MESSAGE);
    }
}
