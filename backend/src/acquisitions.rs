use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;

use crate::error::SourceError;

pub const DEFAULT_ACQUISITION_URL: &str = "https://landsat.usgs.gov/landsat_acquisition_api/v1";
pub const OVERPASS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time range to look for acquisitions in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// `None` when the end falls outside the representable date range.
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Option<Self> {
        Some(Self {
            start,
            end: start.checked_add_signed(length)?,
        })
    }
}

/// Calendar of scheduled Landsat acquisitions over a point.
#[async_trait]
pub trait OverpassSource: Send + Sync {
    async fn overpasses(
        &self,
        at: Coordinate,
        window: Window,
    ) -> Result<Vec<DateTime<Utc>>, SourceError>;
}

/// Client for the USGS Landsat acquisition calendar.
#[derive(Debug, Clone)]
pub struct UsgsAcquisitionClient {
    base_url: String,
    http: Client,
}

impl UsgsAcquisitionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AcquisitionResponse {
    #[serde(default)]
    results: Vec<Acquisition>,
}

#[derive(Debug, Deserialize)]
struct Acquisition {
    acquisition_date: String,
}

#[async_trait]
impl OverpassSource for UsgsAcquisitionClient {
    async fn overpasses(
        &self,
        at: Coordinate,
        window: Window,
    ) -> Result<Vec<DateTime<Utc>>, SourceError> {
        let res = self
            .http
            .get(format!("{}/acqs", self.base_url))
            .query(&[
                ("start_date", window.start.format("%Y-%m-%d").to_string()),
                ("end_date", window.end.format("%Y-%m-%d").to_string()),
                ("lat", at.latitude.to_string()),
                ("lng", at.longitude.to_string()),
                ("satellite", "landsat_8_9".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let parsed: AcquisitionResponse = res.json().await?;
        parsed
            .results
            .iter()
            .map(|acq| parse_acquisition_date(&acq.acquisition_date))
            .collect()
    }
}

fn parse_acquisition_date(raw: &str) -> Result<DateTime<Utc>, SourceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SourceError::Timestamp(raw.to_string()))
}

/// Sorted, window-filtered overpass times rendered for display.
pub fn format_overpasses(mut times: Vec<DateTime<Utc>>, window: Window) -> Vec<String> {
    times.retain(|t| *t >= window.start && *t <= window.end);
    times.sort();
    times
        .into_iter()
        .map(|t| t.format(OVERPASS_TIME_FORMAT).to_string())
        .collect()
}
