//! Checkout Flow Orchestration
//!
//! Drives one user through plan selection, hosted checkout, verification
//! and token display. State transitions follow
//!
//! ```text
//! idle → plan_selected → checkout_opened → verifying
//!      → { token_issued | verification_pending | verification_failed }
//! ```
//!
//! Business outcomes ("payment pending", "payment did not complete") are
//! states, not errors; errors abort the current step and leave retry to
//! the user.

use std::sync::Arc;

use techfix_core::{
    FlowSession, FlowState, FlowStore, IssuedToken, PaymentBackend, PaymentStatus, Plan, PlanId,
    Result, TechFixError, TxRef,
};

use crate::config::{FlowConfig, PendingPolicy};
use crate::external::{ExternalStep, StepHandle, watch_until_closed};

/// One flow instance (one tab, one user)
pub struct CheckoutFlow {
    backend: Arc<dyn PaymentBackend>,
    external: Arc<dyn ExternalStep>,
    store: FlowStore,
    config: FlowConfig,
    session: FlowSession,
    handle: Option<Box<dyn StepHandle>>,
}

impl CheckoutFlow {
    pub fn new(
        backend: Arc<dyn PaymentBackend>,
        external: Arc<dyn ExternalStep>,
        store: FlowStore,
        config: FlowConfig,
    ) -> Self {
        Self {
            backend,
            external,
            store,
            config,
            session: FlowSession::new(),
            handle: None,
        }
    }

    pub fn session(&self) -> &FlowSession {
        &self.session
    }

    pub fn state(&self) -> FlowState {
        self.session.state
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.session.email = email.into();
    }

    /// Persist the terms-acceptance flag (set once, never cleared)
    pub fn accept_terms(&self) -> Result<()> {
        self.store.accept_terms()
    }

    /// Select a plan. Rejected before any network call if the email is
    /// missing an '@' or the terms gate is enabled and unaccepted.
    pub fn select_plan(&mut self, plan: PlanId) -> Result<()> {
        if !matches!(
            self.session.state,
            FlowState::Idle | FlowState::PlanSelected
        ) {
            return Err(TechFixError::Other(format!(
                "cannot select a plan while {:?}",
                self.session.state
            )));
        }

        if !self.session.email_is_valid() {
            return Err(TechFixError::InvalidEmail(self.session.email.clone()));
        }

        if self.config.require_terms && !self.store.terms_accepted()? {
            return Err(TechFixError::TermsNotAccepted);
        }

        self.session.plan = Some(plan);
        self.session.state = FlowState::PlanSelected;
        Ok(())
    }

    /// Create the hosted-checkout session and open it externally
    ///
    /// The pending marker is written only after the window opened, so an
    /// aborted initiation leaves nothing behind to recover. Refuses to
    /// start while a marker from a previous attempt is unresolved.
    pub async fn begin_checkout(&mut self) -> Result<()> {
        let plan = match (self.session.state, self.session.plan) {
            (FlowState::PlanSelected, Some(plan)) => plan,
            _ => return Err(TechFixError::Other("no plan selected".into())),
        };

        if let Some(pending) = self.store.pending_tx_ref()? {
            return Err(TechFixError::RecoveryRequired(pending.to_string()));
        }

        let price = Plan::get(plan).price;
        let created = self
            .backend
            .create_checkout_session(&self.session.email, plan, price)
            .await?;

        let handle = self.external.open(&created.redirect_url)?;

        self.store.set_pending_tx_ref(&created.tx_ref)?;
        self.session.tx_ref = Some(created.tx_ref);
        self.handle = Some(handle);
        self.session.state = FlowState::CheckoutOpened;

        tracing::info!(plan = %plan, "hosted checkout opened");
        Ok(())
    }

    /// Wait for the checkout window to close, then verify
    ///
    /// Taking the handle out up front is what keeps the polling path from
    /// ever verifying the same reference twice concurrently.
    pub async fn complete_checkout(&mut self) -> Result<FlowState> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| TechFixError::Other("no checkout in progress".into()))?;

        watch_until_closed(handle.as_ref(), &self.config).await;

        let tx_ref = self
            .session
            .tx_ref
            .clone()
            .ok_or_else(|| TechFixError::Other("no transaction reference".into()))?;

        self.verify(&tx_ref).await
    }

    /// Ask the backend whether the payment went through
    ///
    /// Backend and network failures are reported as a failed verification,
    /// not propagated; only storage errors bubble up.
    pub async fn verify(&mut self, tx_ref: &TxRef) -> Result<FlowState> {
        if !self.session.state.can_verify() {
            return Err(TechFixError::Other(format!(
                "cannot verify while {:?}",
                self.session.state
            )));
        }
        self.session.state = FlowState::Verifying;

        let verification = match self.backend.verify_payment(tx_ref).await {
            Ok(v) => v,
            Err(e @ (TechFixError::Backend { .. } | TechFixError::Network(_))) => {
                tracing::warn!(%tx_ref, "verification call failed: {e}");
                self.session.state = FlowState::VerificationFailed;
                return Ok(FlowState::VerificationFailed);
            }
            Err(e) => return Err(e),
        };

        match verification.status {
            PaymentStatus::Successful => {
                let (token, expires_at) = match (verification.token, verification.expires_at) {
                    (Some(token), Some(expires_at)) => (token, expires_at),
                    _ => {
                        self.session.state = FlowState::VerificationFailed;
                        return Err(TechFixError::MissingToken(tx_ref.to_string()));
                    }
                };

                // Shown verbatim, never transformed
                self.session.token = Some(IssuedToken { token, expires_at });
                self.store.clear_pending_tx_ref()?;
                self.session.state = FlowState::TokenIssued;
                tracing::info!(%tx_ref, "payment verified, token issued");
            }
            PaymentStatus::Pending => {
                if self.config.pending_policy == PendingPolicy::Clear {
                    self.store.clear_pending_tx_ref()?;
                }
                self.session.state = FlowState::VerificationPending;
                tracing::info!(%tx_ref, "payment still processing");
            }
            PaymentStatus::Other => {
                // Marker stays for a manual retry
                self.session.state = FlowState::VerificationFailed;
                tracing::warn!(%tx_ref, "payment did not complete");
            }
        }

        Ok(self.session.state)
    }

    /// Resume an interrupted flow on page load
    ///
    /// Re-verifies exactly the persisted reference, and nothing when no
    /// marker exists. Runs before any fresh checkout may start.
    pub async fn recover_on_load(&mut self) -> Result<Option<FlowState>> {
        match self.store.pending_tx_ref()? {
            Some(tx_ref) => {
                tracing::info!(%tx_ref, "resuming pending verification");
                self.session.tx_ref = Some(tx_ref.clone());
                Ok(Some(self.verify(&tx_ref).await?))
            }
            None => Ok(None),
        }
    }

    /// User-initiated retry after a pending or failed verification
    pub async fn retry_verification(&mut self) -> Result<FlowState> {
        let tx_ref = self
            .session
            .tx_ref
            .clone()
            .or(self.store.pending_tx_ref()?)
            .ok_or_else(|| TechFixError::Other("nothing to retry".into()))?;

        self.verify(&tx_ref).await
    }

    /// Direct token issuance, the variant without payment
    pub async fn request_token_direct(&mut self, issue: &str, minutes: u32) -> Result<()> {
        if !self.session.email_is_valid() {
            return Err(TechFixError::InvalidEmail(self.session.email.clone()));
        }

        let token = self
            .backend
            .generate_token(&self.session.email, issue, minutes)
            .await?;

        self.session.token = Some(token);
        self.session.state = FlowState::TokenIssued;
        Ok(())
    }

    /// Close the token view and clear the session back to idle
    ///
    /// Idempotent; does not touch the pending marker, which the verifier
    /// alone clears.
    pub fn close_presenter(&mut self) {
        self.session.reset();
        self.handle = None;
    }
}
