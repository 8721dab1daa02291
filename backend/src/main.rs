use std::sync::Arc;

use backend::{
    AppState,
    acquisitions::{OverpassSource, UsgsAcquisitionClient},
    config::Config,
    create_router,
    notify::{LogNotifier, spawn_sweeper},
    scenes::HttpSceneCatalog,
    store::LocationStore,
    with_static_files,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let store = Arc::new(LocationStore::new());
    let overpasses: Arc<dyn OverpassSource> =
        Arc::new(UsgsAcquisitionClient::new(&config.acquisition_url));
    tracing::info!("overpasses from {}", config.acquisition_url);
    tracing::info!("scenes from {}", config.scene_catalog_url);

    if let Some(every) = config.sweep_interval() {
        spawn_sweeper(
            store.clone(),
            overpasses.clone(),
            Arc::new(LogNotifier),
            every,
        );
        tracing::info!("notification sweep every {}h", config.sweep_interval_hours);
    }

    let state = AppState {
        store,
        overpasses,
        scenes: Arc::new(HttpSceneCatalog::new(&config.scene_catalog_url)),
        lookahead: config.lookahead(),
    };
    let mut app = create_router(state);
    if let Some(dir) = &config.static_dir {
        tracing::info!("serving frontend from {}", dir.display());
        app = with_static_files(app, dir);
    }

    tracing::info!("starting backend on http://{}", config.bind);
    tracing::info!("  POST /submit_location - Register a watch location");
    tracing::info!("  POST /get_landsat_data - Scenes under a cloud threshold");
    tracing::info!("  GET /get_locations - List saved locations");
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("bind listener");
    axum::serve(listener, app).await.expect("serve");
}
