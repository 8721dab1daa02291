use std::{sync::Arc, time::Duration as StdDuration};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::acquisitions::{OVERPASS_TIME_FORMAT, OverpassSource, Window};
use crate::models::WatchLocation;
use crate::store::LocationStore;

/// Receives the upcoming overpass found for a watch location.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, location: &WatchLocation, overpass: DateTime<Utc>);
}

/// Writes notifications to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, location: &WatchLocation, overpass: DateTime<Utc>) {
        tracing::info!(
            "Upcoming Landsat pass for '{}' at {}",
            location.name,
            overpass.format(OVERPASS_TIME_FORMAT)
        );
    }
}

/// Window checked for a location: one day, starting after its lead time.
/// `None` when the lead time pushes it past the representable date range.
pub fn notification_window(location: &WatchLocation, now: DateTime<Utc>) -> Option<Window> {
    let start = now.checked_add_signed(Duration::hours(i64::from(location.notification_lead_time)))?;
    Window::starting_at(start, Duration::days(1))
}

/// Runs one pass over every saved location and returns how many
/// notifications were sent.
pub async fn sweep(
    store: &LocationStore,
    source: &dyn OverpassSource,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> usize {
    let mut sent = 0;
    for location in store.list().await {
        let Some(window) = notification_window(&location, now) else {
            tracing::warn!(
                "Skipping '{}': lead time of {}h is out of range",
                location.name,
                location.notification_lead_time
            );
            continue;
        };
        match source.overpasses(location.coordinate, window).await {
            Ok(mut times) => {
                times.retain(|t| *t >= window.start && *t <= window.end);
                if let Some(next) = times.into_iter().min() {
                    notifier.notify(&location, next).await;
                    sent += 1;
                }
            }
            Err(err) => {
                tracing::warn!("Overpass lookup failed for '{}': {}", location.name, err);
            }
        }
    }
    sent
}

/// Spawns the periodic sweep on the current runtime.
pub fn spawn_sweeper(
    store: Arc<LocationStore>,
    source: Arc<dyn OverpassSource>,
    notifier: Arc<dyn Notifier>,
    every: StdDuration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let sent = sweep(&store, source.as_ref(), notifier.as_ref(), Utc::now()).await;
            tracing::debug!("Notification sweep done, {sent} sent");
        }
    })
}
