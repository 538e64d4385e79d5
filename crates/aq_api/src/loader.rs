use aq_core::StationReading;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AppState;

/// Generic user-facing message for any feed failure; the transport detail
/// only goes to the logs.
pub const FEED_ERROR_MESSAGE: &str = "Failed to load air quality data";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Fetch the feed: a GET returning a JSON array of station readings.
/// Non-2xx responses and malformed JSON are both errors; there is no partial
/// recovery, the caller replaces the reading set wholesale or not at all.
pub async fn fetch_readings(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<StationReading>, LoaderError> {
    let readings = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(readings)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub stations: usize,
}

/// Manual retry: refetch the feed from scratch and replace the reading set.
pub async fn reload(State(app): State<AppState>) -> impl IntoResponse {
    tracing::info!("Reloading feed from {}", app.feed_url);
    match fetch_readings(&app.client, &app.feed_url).await {
        Ok(readings) => {
            let stations = readings.len();
            let mut shared = app.shared.lock().unwrap();
            shared.dashboard.replace_readings(readings);
            shared.feed_error = None;
            (StatusCode::OK, Json(ReloadResponse { stations })).into_response()
        }
        Err(error) => {
            tracing::error!("Feed fetch failed: {error}");
            let mut shared = app.shared.lock().unwrap();
            shared.feed_error = Some(FEED_ERROR_MESSAGE.to_string());
            (
                StatusCode::BAD_GATEWAY,
                Json(crate::ErrorResponse {
                    error: FEED_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
    }
}
