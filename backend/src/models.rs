use serde::Deserialize;
use shared::{
    Coordinate, DEFAULT_CLOUD_COVERAGE_THRESHOLD, DEFAULT_NOTIFICATION_LEAD_TIME_HOURS,
    MAX_NOTIFICATION_LEAD_TIME_HOURS, SavedLocation, default_location_name,
};

use crate::error::AppError;

/// `POST /submit_location` body as accepted by the server: every field is
/// optional on the wire and defaults are filled in here.
#[derive(Debug, Deserialize)]
pub struct SubmitLocationPayload {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub cloud_coverage_threshold: Option<f64>,
    pub notification_lead_time: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SceneQueryPayload {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cloud_coverage_threshold: Option<f64>,
}

/// A watch location as held by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchLocation {
    pub id: u64,
    pub name: String,
    pub coordinate: Coordinate,
    pub cloud_coverage_threshold: f64,
    pub notification_lead_time: u32,
}

/// Validated fields of a new or updated watch location.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWatchLocation {
    pub name: String,
    pub coordinate: Coordinate,
    pub cloud_coverage_threshold: f64,
    pub notification_lead_time: u32,
}

impl WatchLocation {
    pub fn to_saved(&self) -> SavedLocation {
        SavedLocation {
            name: self.name.clone(),
            latitude: self.coordinate.latitude,
            longitude: self.coordinate.longitude,
            cloud_coverage_threshold: self.cloud_coverage_threshold,
            notification_lead_time: self.notification_lead_time,
        }
    }
}

impl TryFrom<SubmitLocationPayload> for NewWatchLocation {
    type Error = AppError;

    fn try_from(payload: SubmitLocationPayload) -> Result<Self, Self::Error> {
        let coordinate = coordinate(payload.latitude, payload.longitude)?;
        let cloud_coverage_threshold = threshold(payload.cloud_coverage_threshold)?;
        let name = payload
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                default_location_name(
                    &coordinate.latitude.to_string(),
                    &coordinate.longitude.to_string(),
                )
            });

        Ok(Self {
            name,
            coordinate,
            cloud_coverage_threshold,
            notification_lead_time: lead_time(payload.notification_lead_time)?,
        })
    }
}

impl SceneQueryPayload {
    pub fn validate(self) -> Result<(Coordinate, f64), AppError> {
        Ok((
            coordinate(self.latitude, self.longitude)?,
            threshold(self.cloud_coverage_threshold)?,
        ))
    }
}

fn coordinate(latitude: Option<f64>, longitude: Option<f64>) -> Result<Coordinate, AppError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(AppError::BadRequest(
            "Latitude and longitude are required".to_string(),
        ));
    };
    let coordinate = Coordinate::new(latitude, longitude);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(AppError::BadRequest("Invalid coordinates".to_string()))
    }
}

fn threshold(value: Option<f64>) -> Result<f64, AppError> {
    let value = value.unwrap_or(DEFAULT_CLOUD_COVERAGE_THRESHOLD);
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::BadRequest(
            "Cloud coverage threshold must be between 0 and 100".to_string(),
        ))
    }
}

fn lead_time(value: Option<u32>) -> Result<u32, AppError> {
    let value = value.unwrap_or(DEFAULT_NOTIFICATION_LEAD_TIME_HOURS);
    if value <= MAX_NOTIFICATION_LEAD_TIME_HOURS {
        Ok(value)
    } else {
        Err(AppError::BadRequest(format!(
            "Notification lead time must be at most {MAX_NOTIFICATION_LEAD_TIME_HOURS} hours"
        )))
    }
}
