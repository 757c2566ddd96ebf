//! Wire Types for the Side and Aggregate Endpoints
//!
//! The payment-flow types (`CheckoutCreated`, `PaymentVerification`,
//! `IssuedToken`) live in techfix-core next to the trait; these cover the
//! rest of the backend surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-pushed announcement, shown at most once per browser
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// The day windows the analytics endpoint accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalyticsWindow {
    Week,
    Fortnight,
    Month,
}

impl AnalyticsWindow {
    /// The `days` query parameter value
    pub fn days(&self) -> u32 {
        match self {
            AnalyticsWindow::Week => 7,
            AnalyticsWindow::Fortnight => 14,
            AnalyticsWindow::Month => 30,
        }
    }
}

/// One entry of the dashboard's recent-errors list
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentError {
    pub timestamp: DateTime<Utc>,
    pub issue: String,
    pub error: String,
}

/// Aggregate counters returned by `GET /analytics`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub tokens_generated: u64,
    #[serde(default)]
    pub ai_requests: u64,
    #[serde(default)]
    pub agent_downloads: u64,
    #[serde(default)]
    pub ai_errors: u64,
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub human_help_requests: u64,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub unique_visitors: u64,
    #[serde(default)]
    pub recent_errors: Vec<RecentError>,
}

impl AnalyticsSummary {
    /// Share of AI requests that did not error, rounded to whole percent
    pub fn ai_success_rate(&self) -> u64 {
        let ok = self.ai_requests.saturating_sub(self.ai_errors);
        percent_rounded(ok, self.ai_requests)
    }

    /// Tokens that went on to make an AI request, rounded to whole percent
    pub fn token_conversion_rate(&self) -> u64 {
        percent_rounded(self.ai_requests, self.tokens_generated)
    }
}

/// `numerator / denominator` as whole percent, rounded half-up; 0 when the
/// denominator is 0
fn percent_rounded(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (numerator * 100 + denominator / 2) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_guard_zero_denominators() {
        let empty = AnalyticsSummary::default();
        assert_eq!(empty.ai_success_rate(), 0);
        assert_eq!(empty.token_conversion_rate(), 0);
    }

    #[test]
    fn test_rates() {
        let summary = AnalyticsSummary {
            tokens_generated: 50,
            ai_requests: 40,
            ai_errors: 10,
            ..Default::default()
        };
        assert_eq!(summary.ai_success_rate(), 75);
        assert_eq!(summary.token_conversion_rate(), 80);
    }

    #[test]
    fn test_rates_round_to_nearest_percent() {
        // 2 of 3 is 66.67%, displayed as 67
        let summary = AnalyticsSummary {
            tokens_generated: 3,
            ai_requests: 2,
            ai_errors: 0,
            ..Default::default()
        };
        assert_eq!(summary.token_conversion_rate(), 67);

        let summary = AnalyticsSummary {
            ai_requests: 3,
            ai_errors: 1,
            ..Default::default()
        };
        assert_eq!(summary.ai_success_rate(), 67);

        // 1 of 3 is 33.33%, displayed as 33
        let summary = AnalyticsSummary {
            ai_requests: 3,
            ai_errors: 2,
            ..Default::default()
        };
        assert_eq!(summary.ai_success_rate(), 33);

        // half rounds up
        let summary = AnalyticsSummary {
            tokens_generated: 8,
            ai_requests: 1,
            ..Default::default()
        };
        assert_eq!(summary.token_conversion_rate(), 13);
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: AnalyticsSummary =
            serde_json::from_str(r#"{"tokens_generated": 3}"#).unwrap();
        assert_eq!(summary.tokens_generated, 3);
        assert_eq!(summary.ai_requests, 0);
        assert!(summary.recent_errors.is_empty());
    }

    #[test]
    fn test_window_days() {
        assert_eq!(AnalyticsWindow::Week.days(), 7);
        assert_eq!(AnalyticsWindow::Fortnight.days(), 14);
        assert_eq!(AnalyticsWindow::Month.days(), 30);
    }
}
