//! External Checkout Step
//!
//! The hosted checkout page is outside this system's control; all we can
//! do is open it and wait for the user to finish. `ExternalStep` is the
//! seam: the browser build implements it over `window.open`, tests use
//! [`MockExternalStep`]. Completion detection is a cooperative polling
//! loop; a push-based handle can replace it without touching the flow.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use techfix_core::{Result, TechFixError};

use crate::config::FlowConfig;

/// Handle to an opened checkout window
pub trait StepHandle: Send {
    /// Whether the user has closed the window
    fn is_closed(&self) -> bool;
}

/// Opens the hosted checkout in an external window
pub trait ExternalStep: Send + Sync {
    /// Open `url`; fails if the host blocks the window (popup blocker)
    fn open(&self, url: &str) -> Result<Box<dyn StepHandle>>;
}

/// Poll until the window closes, then wait out the settling delay
///
/// No upper bound: the user may sit on the checkout page indefinitely.
/// Each tick suspends rather than blocks, so the rest of the host keeps
/// running.
pub async fn watch_until_closed(handle: &dyn StepHandle, config: &FlowConfig) {
    while !handle.is_closed() {
        tokio::time::sleep(config.poll_interval).await;
    }
    // Give the backend's payment webhook time to land before verifying
    tokio::time::sleep(config.settle_delay).await;
}

/// Scriptable external step for tests
pub struct MockExternalStep {
    opened: Mutex<Vec<String>>,
    closes_after: usize,
    blocked: bool,
}

impl MockExternalStep {
    /// Window reports closed after `closes_after` polls
    pub fn closing_after(closes_after: usize) -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            closes_after,
            blocked: false,
        }
    }

    /// Simulates a popup blocker: `open` always fails
    pub fn blocked() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            closes_after: 0,
            blocked: true,
        }
    }

    /// URLs passed to `open`, in order
    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl ExternalStep for MockExternalStep {
    fn open(&self, url: &str) -> Result<Box<dyn StepHandle>> {
        if self.blocked {
            return Err(TechFixError::ExternalStep("popup blocked".into()));
        }

        self.opened.lock().unwrap().push(url.to_string());
        Ok(Box::new(CountdownHandle {
            remaining: AtomicUsize::new(self.closes_after),
        }))
    }
}

struct CountdownHandle {
    remaining: AtomicUsize,
}

impl StepHandle for CountdownHandle {
    fn is_closed(&self) -> bool {
        // Each poll counts down one tick
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watcher_waits_for_closure() {
        let step = MockExternalStep::closing_after(3);
        let handle = step.open("https://pay/x").unwrap();

        watch_until_closed(handle.as_ref(), &FlowConfig::fast()).await;
        assert!(handle.is_closed());
        assert_eq!(step.opened_urls(), vec!["https://pay/x".to_string()]);
    }

    #[test]
    fn test_blocked_popup_is_an_error() {
        let step = MockExternalStep::blocked();
        assert!(matches!(
            step.open("https://pay/x"),
            Err(TechFixError::ExternalStep(_))
        ));
    }
}
