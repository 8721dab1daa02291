use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::Request,
};
use backend::{
    AppState,
    acquisitions::{OverpassSource, Window},
    create_router,
    error::SourceError,
    scenes::SceneCatalog,
    store::LocationStore,
};
use chrono::{DateTime, Duration, Utc};
use hyper::StatusCode;
use serde_json::{Value, json};
use shared::{ApiError, Coordinate, OverpassReport, SavedLocation, Scene, SceneReport};
use tower::ServiceExt;

/// Reports one pass two days from now and one far outside any window.
struct FakeCalendar;

#[async_trait]
impl OverpassSource for FakeCalendar {
    async fn overpasses(
        &self,
        _at: Coordinate,
        window: Window,
    ) -> Result<Vec<DateTime<Utc>>, SourceError> {
        Ok(vec![
            window.start + Duration::days(2),
            window.end + Duration::days(30),
        ])
    }
}

struct DownCalendar;

#[async_trait]
impl OverpassSource for DownCalendar {
    async fn overpasses(
        &self,
        _at: Coordinate,
        _window: Window,
    ) -> Result<Vec<DateTime<Utc>>, SourceError> {
        Err(SourceError::Timestamp("unavailable".into()))
    }
}

struct FakeCatalog;

#[async_trait]
impl SceneCatalog for FakeCatalog {
    async fn scenes(&self, _at: Coordinate, _max: f64) -> Result<Vec<Scene>, SourceError> {
        Ok(vec![
            Scene {
                date: "2024-05-01".into(),
                cloud_coverage: 3.0,
            },
            Scene {
                date: "2024-05-17".into(),
                cloud_coverage: 60.0,
            },
        ])
    }
}

fn test_app_with(overpasses: Arc<dyn OverpassSource>) -> axum::Router {
    let state = AppState {
        store: Arc::new(LocationStore::new()),
        overpasses,
        scenes: Arc::new(FakeCatalog),
        lookahead: Duration::days(16),
    };
    create_router(state)
}

fn test_app() -> axum::Router {
    test_app_with(Arc::new(FakeCalendar))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_of<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn submit_returns_overpasses_and_lists_location() {
    let app = test_app();
    let payload = json!({
        "latitude": 45.9305,
        "longitude": 4.5776,
        "name": "Vineyard",
        "cloud_coverage_threshold": 20.0,
        "notification_lead_time": 12
    });

    let response = app
        .clone()
        .oneshot(post("/submit_location", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report: OverpassReport = body_of(response).await;
    assert_eq!(report.message, "Saved location: Vineyard");
    assert_eq!(report.overpasses.len(), 1);

    let response = app.oneshot(get("/get_locations")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let locations: Vec<SavedLocation> = body_of(response).await;
    assert_eq!(
        locations,
        vec![SavedLocation {
            name: "Vineyard".into(),
            latitude: 45.9305,
            longitude: 4.5776,
            cloud_coverage_threshold: 20.0,
            notification_lead_time: 12,
        }]
    );
}

#[tokio::test]
async fn submit_fills_defaults() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post(
            "/submit_location",
            json!({"latitude": 10.5, "longitude": -20.25}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let locations: Vec<SavedLocation> =
        body_of(app.oneshot(get("/get_locations")).await.unwrap()).await;
    assert_eq!(locations[0].name, "Location at 10.5, -20.25");
    assert_eq!(locations[0].cloud_coverage_threshold, 15.0);
    assert_eq!(locations[0].notification_lead_time, 24);
}

#[tokio::test]
async fn resubmitting_a_name_updates_it() {
    let app = test_app();
    for lat in [1.0, 2.0] {
        let response = app
            .clone()
            .oneshot(post(
                "/submit_location",
                json!({"latitude": lat, "longitude": 3.0, "name": "Field"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let locations: Vec<SavedLocation> =
        body_of(app.oneshot(get("/get_locations")).await.unwrap()).await;
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].latitude, 2.0);
}

#[tokio::test]
async fn invalid_submissions_report_error_field() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post("/submit_location", json!({"latitude": 95.0, "longitude": 0.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = body_of(response).await;
    assert_eq!(err.error, "Invalid coordinates");

    let response = app
        .clone()
        .oneshot(post("/submit_location", json!({"longitude": 0.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = body_of(response).await;
    assert_eq!(err.error, "Latitude and longitude are required");

    let response = app
        .clone()
        .oneshot(post("/submit_location", json!({"latitude": "north"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = body_of(response).await;
    assert!(!err.error.is_empty());

    let locations: Vec<SavedLocation> =
        body_of(app.oneshot(get("/get_locations")).await.unwrap()).await;
    assert!(locations.is_empty());
}

#[tokio::test]
async fn huge_lead_time_is_rejected_and_not_stored() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post(
            "/submit_location",
            json!({"latitude": 1.0, "longitude": 1.0, "notification_lead_time": 4294967295u64}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = body_of(response).await;
    assert!(err.error.starts_with("Notification lead time must be at most"));

    let locations: Vec<SavedLocation> =
        body_of(app.oneshot(get("/get_locations")).await.unwrap()).await;
    assert!(locations.is_empty());
}

#[tokio::test]
async fn calendar_outage_still_saves_location() {
    let app = test_app_with(Arc::new(DownCalendar));
    let response = app
        .clone()
        .oneshot(post(
            "/submit_location",
            json!({"latitude": 1.0, "longitude": 1.0, "name": "Offline"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report: OverpassReport = body_of(response).await;
    assert!(report.overpasses.is_empty());

    let locations: Vec<SavedLocation> =
        body_of(app.oneshot(get("/get_locations")).await.unwrap()).await;
    assert_eq!(locations.len(), 1);
}

#[tokio::test]
async fn scene_lookup_filters_by_threshold() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post(
            "/get_landsat_data",
            json!({"latitude": 1.0, "longitude": 1.0, "cloud_coverage_threshold": 10.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report: SceneReport = body_of(response).await;
    assert_eq!(report.data.len(), 1);
    assert_eq!(report.data[0].date, "2024-05-01");
    assert_eq!(
        report.message.as_deref(),
        Some("Landsat data fetched successfully.")
    );

    let response = app
        .oneshot(post(
            "/get_landsat_data",
            json!({"latitude": 1.0, "longitude": 1.0, "cloud_coverage_threshold": 1.0}),
        ))
        .await
        .unwrap();
    let report: SceneReport = body_of(response).await;
    assert!(report.data.is_empty());
    assert_eq!(
        report.message.as_deref(),
        Some("No Landsat scenes found for the given parameters.")
    );
}
