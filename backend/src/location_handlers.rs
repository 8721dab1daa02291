// Handlers for the watch-list API consumed by the frontend

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::Utc;
use shared::{OverpassReport, SavedLocation, SceneReport};

use crate::AppState;
use crate::acquisitions::{Window, format_overpasses};
use crate::error::AppError;
use crate::models::{NewWatchLocation, SceneQueryPayload, SubmitLocationPayload, WatchLocation};
use crate::scenes::within_threshold;

/// POST /submit_location - Register or update a watch location
pub async fn submit_location(
    State(state): State<AppState>,
    payload: Result<Json<SubmitLocationPayload>, JsonRejection>,
) -> Result<Json<OverpassReport>, AppError> {
    let Json(payload) = payload?;
    let location = state.store.upsert(NewWatchLocation::try_from(payload)?).await;

    let overpasses = upcoming_overpasses(&state, &location).await;
    tracing::info!(
        "{} upcoming overpasses for '{}'",
        overpasses.len(),
        location.name
    );

    Ok(Json(OverpassReport {
        message: format!("Saved location: {}", location.name),
        overpasses,
    }))
}

/// Overpasses inside the look-ahead window; lookup failures yield none.
async fn upcoming_overpasses(state: &AppState, location: &WatchLocation) -> Vec<String> {
    let Some(window) = Window::starting_at(Utc::now(), state.lookahead) else {
        tracing::warn!("Look-ahead of {} is out of range", state.lookahead);
        return Vec::new();
    };
    match state.overpasses.overpasses(location.coordinate, window).await {
        Ok(times) => format_overpasses(times, window),
        Err(err) => {
            tracing::warn!("Overpass lookup failed for '{}': {}", location.name, err);
            Vec::new()
        }
    }
}

/// POST /get_landsat_data - Scenes under the cloud-coverage threshold
pub async fn get_landsat_data(
    State(state): State<AppState>,
    payload: Result<Json<SceneQueryPayload>, JsonRejection>,
) -> Result<Json<SceneReport>, AppError> {
    let Json(payload) = payload?;
    let (coordinate, threshold) = payload.validate()?;

    let scenes = within_threshold(state.scenes.scenes(coordinate, threshold).await?, threshold);
    let message = if scenes.is_empty() {
        "No Landsat scenes found for the given parameters."
    } else {
        "Landsat data fetched successfully."
    };

    Ok(Json(SceneReport {
        message: Some(message.to_string()),
        data: scenes,
    }))
}

/// GET /get_locations - List all saved locations
pub async fn get_locations(State(state): State<AppState>) -> Json<Vec<SavedLocation>> {
    let locations = state.store.list().await;
    tracing::debug!("Retrieved {} locations", locations.len());
    Json(locations.iter().map(|l| l.to_saved()).collect())
}
