//! # techfix-core
//!
//! Domain types and seams for the TechFix AI marketing site and its
//! payment-token acquisition flow.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      CheckoutFlow                            │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────────────┐  │
//! │  │  Plan      │  │  FlowStore │  │   PaymentBackend       │  │
//! │  │  Catalog   │──│  (KvStore) │──│   (Strategy)           │  │
//! │  └────────────┘  └────────────┘  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `PaymentBackend` trait keeps the flow independent of the concrete
//! HTTP client, and the `KvStore` trait keeps durable flags (pending
//! transaction marker, terms acceptance, seen notifications) injectable so
//! the reload-recovery path is testable in isolation.

pub mod backend;
pub mod error;
pub mod plan;
pub mod session;
pub mod store;

pub use backend::{CheckoutCreated, IssuedToken, PaymentBackend, PaymentStatus, PaymentVerification};
pub use error::{Result, TechFixError};
pub use plan::{Plan, PlanId};
pub use session::{FlowSession, FlowState, TxRef};
pub use store::{FlowStore, JsonFileStore, KvStore, MemoryKvStore};
