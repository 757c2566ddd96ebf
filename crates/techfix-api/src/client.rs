//! Backend HTTP Client
//!
//! Thin reqwest wrapper over the external TechFix backend. Nothing is
//! retried automatically; all retry is user-initiated (a re-click), so
//! every method maps transport errors to `TechFixError::Network` and
//! non-2xx statuses to `TechFixError::Backend` and returns.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use techfix_core::{
    CheckoutCreated, IssuedToken, PaymentBackend, PaymentVerification, PlanId, Result,
    TechFixError, TxRef,
};

use crate::types::{AnalyticsSummary, AnalyticsWindow, Notification};

const DEFAULT_BASE_URL: &str = "https://techfixai-backend.onrender.com";

/// Backend client configuration
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Backend base URL, no trailing slash
    pub base_url: String,

    /// API key for the analytics endpoint
    pub analytics_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            analytics_key: None,
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("TECHFIX_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let analytics_key = std::env::var("TECHFIX_ANALYTICS_KEY").ok();
        let timeout_secs = std::env::var("TECHFIX_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            analytics_key,
            timeout_secs,
        }
    }
}

/// HTTP client for the TechFix backend
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create from configuration
    pub fn from_config(config: BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TechFixError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(BackendConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| TechFixError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TechFixError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TechFixError::Network(e.to_string()))
    }

    /// Fetch the current announcement, if any
    pub async fn notifications(&self) -> Result<Notification> {
        let response = self
            .http
            .get(self.url("/notifications"))
            .send()
            .await
            .map_err(|e| TechFixError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    /// Fetch aggregate counters for the dashboard view
    pub async fn analytics(&self, window: AnalyticsWindow) -> Result<AnalyticsSummary> {
        let key = self
            .config
            .analytics_key
            .as_deref()
            .ok_or_else(|| TechFixError::Config("TECHFIX_ANALYTICS_KEY not set".into()))?;

        let days = window.days().to_string();
        let response = self
            .http
            .get(self.url("/analytics"))
            .query(&[("key", key), ("days", days.as_str())])
            .send()
            .await
            .map_err(|e| TechFixError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    /// Record an agent download. Fire-and-forget: failures are logged and
    /// never surfaced, so a dead analytics pipeline cannot block downloads.
    pub async fn track_download(&self, platform: &str, version: &str) {
        let body = serde_json::json!({ "type": platform, "version": version });

        let result = self
            .http
            .post(self.url("/track-download"))
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(platform, version, "download tracked");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "download tracking rejected");
            }
            Err(e) => {
                tracing::warn!("download tracking failed: {e}");
            }
        }
    }

    /// Reachability probe for the site server's health endpoint
    pub async fn health_check(&self) -> bool {
        match self.http.get(self.url("/notifications")).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("backend health check failed: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl PaymentBackend for BackendClient {
    async fn create_checkout_session(
        &self,
        email: &str,
        plan: PlanId,
        amount: u32,
    ) -> Result<CheckoutCreated> {
        let body = serde_json::json!({
            "email": email,
            "plan": plan.as_str(),
            "amount": amount,
        });

        self.post_json("/create-checkout-session", &body).await
    }

    async fn verify_payment(&self, tx_ref: &TxRef) -> Result<PaymentVerification> {
        let body = serde_json::json!({ "tx_ref": tx_ref.as_str() });
        self.post_json("/verify-payment", &body).await
    }

    async fn generate_token(
        &self,
        email: &str,
        issue: &str,
        minutes: u32,
    ) -> Result<IssuedToken> {
        let body = serde_json::json!({
            "email": email,
            "issue": issue,
            "minutes": minutes,
        });

        self.post_json("/generate-token", &body).await
    }
}
