use seed::{prelude::*, *};
use shared::SavedLocation;

/// Client-side projection of the saved locations, always replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchList {
    entries: Vec<SavedLocation>,
}

impl WatchList {
    pub fn replace(&mut self, entries: Vec<SavedLocation>) {
        self.entries = entries;
    }

    /// Replaces the list on success; on failure the previous list stays and
    /// the error is handed back for logging.
    pub fn apply(&mut self, fetched: Result<Vec<SavedLocation>, String>) -> Result<(), String> {
        self.replace(fetched?);
        Ok(())
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SavedLocation] {
        &self.entries
    }

    #[cfg(test)]
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(entry_label).collect()
    }

    pub fn view<Ms: 'static>(&self) -> Node<Ms> {
        ul![
            id!["saved-locations"],
            self.entries.iter().map(|entry| li![entry_label(entry)])
        ]
    }
}

pub fn entry_label(entry: &SavedLocation) -> String {
    format!(
        "{} ({}, {}) - Cloud coverage: {}%, Notification lead time: {}h",
        entry.name,
        entry.latitude,
        entry.longitude,
        entry.cloud_coverage_threshold,
        entry.notification_lead_time
    )
}
