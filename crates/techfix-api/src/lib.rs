//! # techfix-api
//!
//! HTTP client for the external TechFix backend
//! (`techfixai-backend.onrender.com`). All business logic lives on that
//! service; this crate only speaks its wire format:
//!
//! - `POST /create-checkout-session`, `POST /verify-payment`,
//!   `POST /generate-token` — the payment-token flow (exposed through the
//!   [`techfix_core::PaymentBackend`] trait);
//! - `GET /notifications`, `GET /analytics`, `POST /track-download` —
//!   side and aggregate calls used by the site and the dashboard view.
//!
//! [`MockBackend`] is a scriptable stand-in for tests and offline demos.

mod client;
mod mock;
mod types;

pub use client::{BackendClient, BackendConfig};
pub use mock::MockBackend;
pub use types::{AnalyticsSummary, AnalyticsWindow, Notification, RecentError};
