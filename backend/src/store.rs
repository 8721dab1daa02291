use tokio::sync::RwLock;

use crate::models::{NewWatchLocation, WatchLocation};

/// In-memory watch list. Locations are keyed by name: registering a name
/// that already exists updates that entry in place.
#[derive(Debug, Default)]
pub struct LocationStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    locations: Vec<WatchLocation>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, new: NewWatchLocation) -> WatchLocation {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.locations.iter_mut().find(|l| l.name == new.name) {
            existing.coordinate = new.coordinate;
            existing.cloud_coverage_threshold = new.cloud_coverage_threshold;
            existing.notification_lead_time = new.notification_lead_time;
            tracing::info!("Location updated: {} (ID: {})", existing.name, existing.id);
            return existing.clone();
        }

        inner.next_id += 1;
        let location = WatchLocation {
            id: inner.next_id,
            name: new.name,
            coordinate: new.coordinate,
            cloud_coverage_threshold: new.cloud_coverage_threshold,
            notification_lead_time: new.notification_lead_time,
        };
        tracing::info!("Location saved: {} (ID: {})", location.name, location.id);
        inner.locations.push(location.clone());
        location
    }

    /// All locations in registration order.
    pub async fn list(&self) -> Vec<WatchLocation> {
        self.inner.read().await.locations.clone()
    }
}
