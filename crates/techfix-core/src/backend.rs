//! Payment Backend Abstraction
//!
//! The flow never talks HTTP directly; it goes through this trait so the
//! concrete client (techfix-api) can be swapped for a mock in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plan::PlanId;
use crate::session::TxRef;

/// Result of creating a hosted-checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutCreated {
    /// Hosted checkout page to open
    pub redirect_url: String,

    /// Reference used to verify the payment later
    pub tx_ref: TxRef,
}

/// Payment status as reported by `/verify-payment`
///
/// Anything the backend says that is neither "successful" nor "pending"
/// lands in `Other` and is treated as a failed attempt, not a program
/// error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Successful,
    Pending,
    #[serde(other)]
    Other,
}

/// Response of a verification call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub status: PaymentStatus,

    /// Present only on a successful payment
    #[serde(default)]
    pub token: Option<String>,

    /// Token expiry, paired with `token`
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A service token issued by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Short code the user feeds to the desktop agent, shown verbatim
    pub token: String,

    /// When the session entitlement lapses
    pub expires_at: DateTime<Utc>,
}

/// Backend operations the checkout flow depends on (Strategy pattern)
///
/// Implemented over HTTP by `techfix-api`, and by its `MockBackend` for
/// tests and demos.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Create a hosted-checkout session for `plan` at `amount` whole USD
    async fn create_checkout_session(
        &self,
        email: &str,
        plan: PlanId,
        amount: u32,
    ) -> Result<CheckoutCreated>;

    /// Ask the backend whether a payment went through
    async fn verify_payment(&self, tx_ref: &TxRef) -> Result<PaymentVerification>;

    /// Direct token issuance, used by the variant without payment
    async fn generate_token(
        &self,
        email: &str,
        issue: &str,
        minutes: u32,
    ) -> Result<IssuedToken>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_parses_as_other() {
        let v: PaymentVerification =
            serde_json::from_str(r#"{"status":"cancelled"}"#).unwrap();
        assert_eq!(v.status, PaymentStatus::Other);
        assert!(v.token.is_none());
    }

    #[test]
    fn test_successful_status_with_token() {
        let v: PaymentVerification = serde_json::from_str(
            r#"{"status":"successful","token":"12345678","expires_at":"2025-01-01T00:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(v.status, PaymentStatus::Successful);
        assert_eq!(v.token.as_deref(), Some("12345678"));
        assert!(v.expires_at.is_some());
    }
}
