//! Mock Backend
//!
//! For testing and offline demos. Checkout sessions get generated
//! references; verification outcomes are scripted ahead of time and
//! served in order, defaulting to a successful payment.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use techfix_core::{
    CheckoutCreated, IssuedToken, PaymentBackend, PaymentStatus, PaymentVerification, PlanId,
    Result, TechFixError, TxRef,
};

/// Scriptable backend stand-in
pub struct MockBackend {
    outcomes: Mutex<VecDeque<Result<PaymentVerification>>>,
    checkout_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    last_verified: Mutex<Option<TxRef>>,
    fail_checkout: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            checkout_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            last_verified: Mutex::new(None),
            fail_checkout: false,
        }
    }

    /// Backend whose checkout creation always errors
    pub fn failing_checkout() -> Self {
        Self {
            fail_checkout: true,
            ..Self::new()
        }
    }

    /// Queue the next verification outcome
    pub fn push_outcome(&self, outcome: PaymentVerification) {
        self.outcomes.lock().unwrap().push_back(Ok(outcome));
    }

    /// Queue a transport failure for the next verification call
    pub fn push_network_error(&self) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(TechFixError::Network("connection reset".into())));
    }

    /// Shorthand for a successful verification issuing `token`
    pub fn push_success(&self, token: &str) {
        self.push_outcome(PaymentVerification {
            status: PaymentStatus::Successful,
            token: Some(token.to_string()),
            expires_at: Some(Utc::now() + Duration::minutes(30)),
        });
    }

    /// Shorthand for a still-processing verification
    pub fn push_pending(&self) {
        self.push_outcome(PaymentVerification {
            status: PaymentStatus::Pending,
            token: None,
            expires_at: None,
        });
    }

    /// Shorthand for a failed/abandoned payment
    pub fn push_failed(&self) {
        self.push_outcome(PaymentVerification {
            status: PaymentStatus::Other,
            token: None,
            expires_at: None,
        });
    }

    /// How many times `create_checkout_session` was called
    pub fn checkout_calls(&self) -> usize {
        self.checkout_calls.load(Ordering::SeqCst)
    }

    /// How many times `verify_payment` was called
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// The reference passed to the most recent verification
    pub fn last_verified(&self) -> Option<TxRef> {
        self.last_verified.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentBackend for MockBackend {
    async fn create_checkout_session(
        &self,
        email: &str,
        plan: PlanId,
        _amount: u32,
    ) -> Result<CheckoutCreated> {
        self.checkout_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_checkout {
            return Err(TechFixError::Backend {
                status: 500,
                message: "checkout unavailable".into(),
            });
        }

        let tx_ref = TxRef::from_string(format!("tx_{}", uuid::Uuid::new_v4().simple()));
        Ok(CheckoutCreated {
            redirect_url: format!("https://pay.example/{}/{}", plan.as_str(), email),
            tx_ref,
        })
    }

    async fn verify_payment(&self, tx_ref: &TxRef) -> Result<PaymentVerification> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_verified.lock().unwrap() = Some(tx_ref.clone());

        let scripted = self.outcomes.lock().unwrap().pop_front();
        scripted.unwrap_or(Ok(PaymentVerification {
            status: PaymentStatus::Successful,
            token: Some("12345678".into()),
            expires_at: Some(Utc::now() + Duration::minutes(30)),
        }))
    }

    async fn generate_token(
        &self,
        _email: &str,
        _issue: &str,
        minutes: u32,
    ) -> Result<IssuedToken> {
        Ok(IssuedToken {
            token: "87654321".into(),
            expires_at: Utc::now() + Duration::minutes(i64::from(minutes)),
        })
    }
}
