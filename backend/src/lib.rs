pub mod acquisitions;
pub mod config;
pub mod error;
pub mod location_handlers;
pub mod models;
pub mod notify;
pub mod scenes;
pub mod store;

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::acquisitions::OverpassSource;
use crate::scenes::SceneCatalog;
use crate::store::LocationStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LocationStore>,
    pub overpasses: Arc<dyn OverpassSource>,
    pub scenes: Arc<dyn SceneCatalog>,
    /// How far ahead overpasses are reported after a submission.
    pub lookahead: chrono::Duration,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/submit_location",
            post(location_handlers::submit_location),
        )
        .route(
            "/get_landsat_data",
            post(location_handlers::get_landsat_data),
        )
        .route("/get_locations", get(location_handlers::get_locations))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the built frontend for any path the API does not handle.
pub fn with_static_files(router: Router, dir: &Path) -> Router {
    router.fallback_service(ServeDir::new(dir))
}
