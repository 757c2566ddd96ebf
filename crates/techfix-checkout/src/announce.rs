//! Server-Pushed Announcements
//!
//! The backend exposes one current announcement at a time; each is shown
//! at most once per browser, tracked through the persisted seen set. A
//! best-effort side call: every failure is logged and swallowed, never
//! blocking the main flow.

use techfix_api::{BackendClient, Notification};
use techfix_core::{FlowStore, Result};

/// Fetches announcements and filters out ones already shown
pub struct AnnouncementChecker {
    store: FlowStore,
}

impl AnnouncementChecker {
    pub fn new(store: FlowStore) -> Self {
        Self { store }
    }

    /// The next announcement to display, if any; marks it seen
    pub async fn next(&self, client: &BackendClient) -> Option<Notification> {
        match client.notifications().await {
            Ok(notification) => match self.admit(notification) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("announcement seen-set unavailable: {e}");
                    None
                }
            },
            Err(e) => {
                tracing::debug!("announcement fetch failed: {e}");
                None
            }
        }
    }

    /// Seen-set filtering, separated from the fetch so it is testable
    /// without a network
    fn admit(&self, notification: Notification) -> Result<Option<Notification>> {
        if self.store.notification_seen(&notification.id)? {
            return Ok(None);
        }

        self.store.mark_notification_seen(&notification.id)?;
        Ok(Some(notification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use techfix_core::MemoryKvStore;

    fn sample(id: &str) -> Notification {
        Notification {
            id: id.into(),
            title: "Maintenance window".into(),
            message: "Repairs paused Sunday 02:00-03:00 UTC".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_announcement_shown_once() {
        let store = FlowStore::new(Arc::new(MemoryKvStore::new()));
        let checker = AnnouncementChecker::new(store);

        assert!(checker.admit(sample("n1")).unwrap().is_some());
        assert!(checker.admit(sample("n1")).unwrap().is_none());
        assert!(checker.admit(sample("n2")).unwrap().is_some());
    }
}
