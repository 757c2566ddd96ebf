//! # techfix-checkout
//!
//! The payment-token acquisition flow of the TechFix AI site, the one
//! stateful interaction sequence in the system:
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌─────────────┐   ┌───────────┐
//! │  Plan    │──▶│   Checkout    │──▶│   Popup     │──▶│  Payment  │
//! │  select  │   │   Initiator   │   │   Watcher   │   │  Verifier │
//! └──────────┘   └───────────────┘   └─────────────┘   └─────┬─────┘
//!                       │ persists                           │
//!                       ▼                                    ▼
//!                ┌──────────────┐                     ┌─────────────┐
//!                │ Pending      │◀────────────────────│   Token     │
//!                │ marker       │  cleared on success │  Presenter  │
//!                └──────────────┘                     └─────────────┘
//! ```
//!
//! The hosted checkout runs in a window this code does not control; the
//! [`ExternalStep`] trait abstracts opening it and the polling watcher
//! detects when the user is done. A transaction reference persisted
//! through [`techfix_core::FlowStore`] lets an interrupted flow resume on
//! the next load.

mod announce;
mod config;
mod downloads;
mod external;
mod flow;
mod presenter;

pub use announce::AnnouncementChecker;
pub use config::{FlowConfig, PendingPolicy};
pub use downloads::{AgentPlatform, record_download};
pub use external::{ExternalStep, MockExternalStep, StepHandle, watch_until_closed};
pub use flow::CheckoutFlow;
pub use presenter::{Clipboard, CopyIndicator, MemoryClipboard, TokenView};
