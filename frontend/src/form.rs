use shared::{
    Coordinate, DEFAULT_CLOUD_COVERAGE_THRESHOLD, DEFAULT_NOTIFICATION_LEAD_TIME_HOURS,
    MAX_NOTIFICATION_LEAD_TIME_HOURS, SceneQuery, SubmitLocationRequest, default_location_name,
};
use thiserror::Error;

/// Raw text of the watch-location form, exactly as typed or picked.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct LocationForm {
    pub latitude: String,
    pub longitude: String,
    pub name: String,
    pub cloud_coverage: String,
    pub notification_lead_time: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Please enter both latitude and longitude.")]
    MissingCoordinates,
    #[error("Invalid {0}.")]
    InvalidNumber(&'static str),
    #[error("Latitude must be between -90 and 90 and longitude between -180 and 180.")]
    OutOfRange,
    #[error("Cloud coverage threshold must be between 0 and 100.")]
    InvalidThreshold,
    #[error("Notification lead time must be at most {} hours.", MAX_NOTIFICATION_LEAD_TIME_HOURS)]
    InvalidLeadTime,
}

impl LocationForm {
    pub fn to_request(&self) -> Result<SubmitLocationRequest, FormError> {
        let coordinate = self.coordinate()?;
        let cloud_coverage_threshold = self.threshold()?;
        let notification_lead_time = self.lead_time()?;

        let name = match self.name.trim() {
            "" => default_location_name(self.latitude.trim(), self.longitude.trim()),
            name => name.to_string(),
        };

        Ok(SubmitLocationRequest {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            name,
            cloud_coverage_threshold,
            notification_lead_time,
        })
    }

    pub fn to_scene_query(&self) -> Result<SceneQuery, FormError> {
        let coordinate = self.coordinate()?;
        Ok(SceneQuery {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            cloud_coverage_threshold: self.threshold()?,
        })
    }

    fn coordinate(&self) -> Result<Coordinate, FormError> {
        let (lat, lon) = (self.latitude.trim(), self.longitude.trim());
        if lat.is_empty() || lon.is_empty() {
            return Err(FormError::MissingCoordinates);
        }
        let coordinate = Coordinate::new(
            lat.parse().map_err(|_| FormError::InvalidNumber("latitude"))?,
            lon.parse()
                .map_err(|_| FormError::InvalidNumber("longitude"))?,
        );
        if !coordinate.is_valid() {
            return Err(FormError::OutOfRange);
        }
        Ok(coordinate)
    }

    fn threshold(&self) -> Result<f64, FormError> {
        let value = parse_or(
            &self.cloud_coverage,
            "cloud coverage threshold",
            DEFAULT_CLOUD_COVERAGE_THRESHOLD,
        )?;
        if (0.0..=100.0).contains(&value) {
            Ok(value)
        } else {
            Err(FormError::InvalidThreshold)
        }
    }

    fn lead_time(&self) -> Result<u32, FormError> {
        let value = parse_or(
            &self.notification_lead_time,
            "notification lead time",
            DEFAULT_NOTIFICATION_LEAD_TIME_HOURS,
        )?;
        if value <= MAX_NOTIFICATION_LEAD_TIME_HOURS {
            Ok(value)
        } else {
            Err(FormError::InvalidLeadTime)
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    field: &str,
    label: &'static str,
    default: T,
) -> Result<T, FormError> {
    match field.trim() {
        "" => Ok(default),
        text => text.parse().map_err(|_| FormError::InvalidNumber(label)),
    }
}
