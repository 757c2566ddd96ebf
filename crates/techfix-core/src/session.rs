//! Flow Session State
//!
//! In-memory state for one pass through the payment-token flow, plus the
//! state machine that gates its transitions. Durable state (the pending
//! transaction marker) lives in [`crate::store`], not here.

use serde::{Deserialize, Serialize};

use crate::backend::IssuedToken;
use crate::plan::PlanId;

/// Opaque transaction reference returned by checkout creation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxRef(String);

impl TxRef {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where one attempt currently stands
///
/// `TokenIssued` and `VerificationFailed` are terminal for the attempt;
/// `VerificationPending` re-enters `Verifying` only via a manual retry or
/// the next load's recovery check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Idle,
    PlanSelected,
    CheckoutOpened,
    Verifying,
    TokenIssued,
    VerificationPending,
    VerificationFailed,
}

impl FlowState {
    /// Terminal for this attempt (a new one starts from `Idle`)
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::TokenIssued | FlowState::VerificationFailed)
    }

    /// Verification may be (re-)entered from here
    pub fn can_verify(&self) -> bool {
        matches!(
            self,
            FlowState::Idle
                | FlowState::CheckoutOpened
                | FlowState::VerificationPending
                | FlowState::VerificationFailed
        )
    }
}

/// Mutable state for the user's current pass through the flow
///
/// Created empty on load, populated incrementally, cleared entirely when
/// the token view is closed or the flow is abandoned.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlowSession {
    /// Customer email; must contain '@' before any network call
    pub email: String,

    /// Selected plan
    pub plan: Option<PlanId>,

    /// Assigned once checkout is initiated
    pub tx_ref: Option<TxRef>,

    /// Token issued after successful verification
    pub token: Option<IssuedToken>,

    /// Current position in the state machine
    #[serde(default)]
    pub state: FlowState,
}

impl FlowSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Email is usable for checkout
    pub fn email_is_valid(&self) -> bool {
        !self.email.trim().is_empty() && self.email.contains('@')
    }

    /// Clear everything back to the initial state
    ///
    /// Idempotent: closing the token view twice leaves the same state as
    /// closing it once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = FlowSession::new();
        assert_eq!(session.state, FlowState::Idle);
        assert!(session.email.is_empty());
        assert!(session.plan.is_none());
        assert!(session.tx_ref.is_none());
        assert!(session.token.is_none());
    }

    #[test]
    fn test_email_validation() {
        let mut session = FlowSession::new();
        assert!(!session.email_is_valid());
        session.email = "   ".into();
        assert!(!session.email_is_valid());
        session.email = "no-at-sign".into();
        assert!(!session.email_is_valid());
        session.email = "a@b.com".into();
        assert!(session.email_is_valid());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = FlowSession::new();
        session.email = "a@b.com".into();
        session.plan = Some(PlanId::Basic);
        session.tx_ref = Some(TxRef::from_string("tx_1"));
        session.token = Some(IssuedToken {
            token: "12345678".into(),
            expires_at: Utc::now(),
        });
        session.state = FlowState::TokenIssued;

        session.reset();
        let after_one = session.clone();
        session.reset();

        assert_eq!(session.state, FlowState::Idle);
        assert!(session.email.is_empty());
        assert!(session.token.is_none());
        assert_eq!(format!("{after_one:?}"), format!("{session:?}"));
    }

    #[test]
    fn test_terminal_states() {
        assert!(FlowState::TokenIssued.is_terminal());
        assert!(FlowState::VerificationFailed.is_terminal());
        assert!(!FlowState::VerificationPending.is_terminal());
        assert!(!FlowState::CheckoutOpened.is_terminal());
    }
}
