//! Flow Configuration
//!
//! The observed variants of the flow differed only in a few knobs (terms
//! gate on or off, what to do with the pending marker on a "pending"
//! verification); those are configuration here, not separate code paths.

use std::time::Duration;

/// How often the watcher checks whether the checkout window closed
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Grace period after closure for the backend's payment webhook to land
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// How long the "copied" indicator stays on after copying the token
pub const DEFAULT_COPIED_RESET: Duration = Duration::from_secs(2);

/// What to do with the pending marker when verification says "pending"
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingPolicy {
    /// Keep the marker so the next load retries automatically
    #[default]
    Retain,

    /// Drop the marker, forcing the user to restart
    Clear,
}

/// Tunables for one flow instance
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// Popup-closed poll tick
    pub poll_interval: Duration,

    /// Settling delay between closure and verification
    pub settle_delay: Duration,

    /// Marker handling on a "pending" outcome
    pub pending_policy: PendingPolicy,

    /// Gate plan selection behind the persisted terms-acceptance flag
    pub require_terms: bool,

    /// Copy-to-clipboard indicator timeout
    pub copied_reset: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            pending_policy: PendingPolicy::default(),
            require_terms: true,
            copied_reset: DEFAULT_COPIED_RESET,
        }
    }
}

impl FlowConfig {
    /// Fast timings for tests
    pub fn fast() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            settle_delay: Duration::from_millis(1),
            copied_reset: Duration::from_millis(5),
            ..Self::default()
        }
    }
}
