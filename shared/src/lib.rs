use serde::{Deserialize, Serialize};

pub const DEFAULT_CLOUD_COVERAGE_THRESHOLD: f64 = 15.0;
pub const DEFAULT_NOTIFICATION_LEAD_TIME_HOURS: u32 = 24;
/// One year; longer lead times are rejected on both sides.
pub const MAX_NOTIFICATION_LEAD_TIME_HOURS: u32 = 24 * 366;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Body of `POST /submit_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub cloud_coverage_threshold: f64,
    pub notification_lead_time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassReport {
    pub message: String,
    #[serde(default)]
    pub overpasses: Vec<String>,
}

/// Body of `POST /get_landsat_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub cloud_coverage_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub date: String,
    pub cloud_coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<Scene>,
}

/// One entry of `GET /get_locations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cloud_coverage_threshold: f64,
    pub notification_lead_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// A backend reply that is either an application error or a payload.
///
/// The failure variant is tried first, so a body carrying an `error` field
/// is always a failure even when it also carries data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiReply<T> {
    Failure { error: String },
    Success(T),
}

impl<T> ApiReply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiReply::Failure { error } => Err(error),
            ApiReply::Success(value) => Ok(value),
        }
    }
}

/// Label used when a location is registered without a name.
pub fn default_location_name(latitude: &str, longitude: &str) -> String {
    format!("Location at {latitude}, {longitude}")
}
