//! Error Types

use thiserror::Error;

/// Result type alias for TechFix operations
pub type Result<T> = std::result::Result<T, TechFixError>;

/// Errors shared across the site crates
#[derive(Error, Debug)]
pub enum TechFixError {
    /// Email missing or without an '@'
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Plan id outside the catalog
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    /// Terms gate is enabled and terms were never accepted
    #[error("Terms of service not accepted")]
    TermsNotAccepted,

    /// A pending transaction marker exists; recovery must run first
    #[error("Pending verification for {0} must be resolved before a new checkout")]
    RecoveryRequired(String),

    /// Backend answered with a non-success HTTP status
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Transport-level failure reaching the backend
    #[error("Network error: {0}")]
    Network(String),

    /// The hosted-checkout window could not be opened (e.g. popup blocked)
    #[error("External step failed: {0}")]
    ExternalStep(String),

    /// Backend reported a successful payment but returned no token
    #[error("Verification succeeded but no token was issued for {0}")]
    MissingToken(String),

    /// Persistent store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl TechFixError {
    /// Check if a user-initiated retry is worthwhile
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TechFixError::Backend { .. }
                | TechFixError::Network(_)
                | TechFixError::Storage(_)
                | TechFixError::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            TechFixError::InvalidEmail(_) => {
                "Please enter a valid email address first.".into()
            }
            TechFixError::UnknownPlan(_) => "That plan is not available.".into(),
            TechFixError::TermsNotAccepted => {
                "Please accept the terms of service to continue.".into()
            }
            TechFixError::RecoveryRequired(_) => {
                "A previous payment is still being confirmed. Please wait a moment.".into()
            }
            TechFixError::Backend { .. } | TechFixError::Network(_) => {
                "We could not reach the payment service. Please try again.".into()
            }
            TechFixError::ExternalStep(_) => {
                "The checkout window could not be opened. Please allow popups and retry.".into()
            }
            TechFixError::MissingToken(_) => {
                "Payment confirmed but the token could not be retrieved. Contact support.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for TechFixError {
    fn from(err: anyhow::Error) -> Self {
        TechFixError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TechFixError::Network("timed out".into()).is_retryable());
        assert!(
            TechFixError::Backend {
                status: 502,
                message: "bad gateway".into()
            }
            .is_retryable()
        );
        assert!(!TechFixError::InvalidEmail("nope".into()).is_retryable());
        assert!(!TechFixError::TermsNotAccepted.is_retryable());
    }

    #[test]
    fn test_user_messages_are_not_debug_dumps() {
        let msg = TechFixError::ExternalStep("window.open returned null".into()).user_message();
        assert!(!msg.contains("window.open"));
    }
}
