use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, Scene};

use crate::error::SourceError;

/// Archive of already-acquired Landsat scenes.
#[async_trait]
pub trait SceneCatalog: Send + Sync {
    async fn scenes(&self, at: Coordinate, max_cloud_cover: f64) -> Result<Vec<Scene>, SourceError>;
}

#[derive(Debug, Clone)]
pub struct HttpSceneCatalog {
    url: String,
    http: Client,
}

impl HttpSceneCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    scenes: Vec<Scene>,
}

#[async_trait]
impl SceneCatalog for HttpSceneCatalog {
    async fn scenes(&self, at: Coordinate, max_cloud_cover: f64) -> Result<Vec<Scene>, SourceError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("lat", at.latitude),
                ("lon", at.longitude),
                ("cloud_cover", max_cloud_cover),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let parsed: CatalogResponse = res.json().await?;
        Ok(parsed.scenes)
    }
}

/// Catalogues may ignore the cloud-cover hint, so results are filtered again.
pub fn within_threshold(scenes: Vec<Scene>, max_cloud_cover: f64) -> Vec<Scene> {
    scenes
        .into_iter()
        .filter(|scene| scene.cloud_coverage <= max_cloud_cover)
        .collect()
}
