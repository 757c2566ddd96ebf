//! Token Presenter
//!
//! Renders an issued token for display and handles copy-to-clipboard with
//! a transient "copied" indicator. The token string is never transformed;
//! what the backend issued is what the user copies.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use techfix_core::{IssuedToken, Result, TechFixError};

/// Host clipboard seam; the browser build wires this to the Clipboard API
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// In-memory clipboard (for development/testing)
#[derive(Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        *self
            .content
            .lock()
            .map_err(|e| TechFixError::Other(e.to_string()))? = Some(text.to_string());
        Ok(())
    }
}

/// Display-ready view of an issued token
#[derive(Clone, Debug)]
pub struct TokenView {
    token: IssuedToken,
}

impl TokenView {
    pub fn new(token: IssuedToken) -> Self {
        Self { token }
    }

    /// The token exactly as issued
    pub fn token(&self) -> &str {
        &self.token.token
    }

    /// Expiry in human-readable form
    pub fn expiry_text(&self) -> String {
        format!(
            "Valid until {}",
            self.token.expires_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// Copy action with a self-reverting "copied" indicator
pub struct CopyIndicator {
    reset_after: Duration,
    copied_at: Option<Instant>,
}

impl CopyIndicator {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            reset_after,
            copied_at: None,
        }
    }

    /// Place the exact token string on the clipboard and light the
    /// indicator
    pub fn copy(&mut self, clipboard: &dyn Clipboard, view: &TokenView) -> Result<()> {
        clipboard.set_text(view.token())?;
        self.copied_at = Some(Instant::now());
        Ok(())
    }

    /// Indicator state as of `now`; reverts once the timeout elapsed
    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.duration_since(at) < self.reset_after)
    }

    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_view() -> TokenView {
        TokenView::new(IssuedToken {
            token: "12345678".into(),
            expires_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap(),
        })
    }

    #[test]
    fn test_token_rendered_verbatim() {
        let view = sample_view();
        assert_eq!(view.token(), "12345678");
        assert_eq!(view.expiry_text(), "Valid until 2025-01-01 00:30 UTC");
    }

    #[test]
    fn test_copy_places_exact_token_on_clipboard() {
        let clipboard = MemoryClipboard::new();
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));

        indicator.copy(&clipboard, &sample_view()).unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("12345678"));
    }

    #[test]
    fn test_indicator_reverts_after_timeout() {
        let clipboard = MemoryClipboard::new();
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));
        assert!(!indicator.is_copied());

        indicator.copy(&clipboard, &sample_view()).unwrap();
        let copied_at = Instant::now();
        assert!(indicator.is_copied_at(copied_at));
        assert!(indicator.is_copied_at(copied_at + Duration::from_millis(1500)));
        assert!(!indicator.is_copied_at(copied_at + Duration::from_secs(3)));
    }
}
