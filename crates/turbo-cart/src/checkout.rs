//! Checkout hand-off.
//!
//! The cart does not run a checkout flow. It only raises a signal carrying
//! the lines and totals, and offers a timed confirmation notice for the UI.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, OrderSummary};

/// How long the "proceeding to checkout" notice stays visible by default.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Payload of a checkout signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    /// Lines at the time checkout was requested.
    pub lines: Vec<CartLine>,
    /// Totals for those lines.
    pub summary: OrderSummary,
    /// Store revision the request was taken from.
    pub revision: u64,
}

impl CheckoutRequest {
    /// Check if the request carries no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Transient confirmation shown after a checkout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutNotice {
    shown_at: Instant,
    duration: Duration,
}

impl CheckoutNotice {
    /// Show a notice starting at `now`.
    pub fn show(now: Instant, duration: Duration) -> Self {
        Self {
            shown_at: now,
            duration,
        }
    }

    /// Show a notice for [`DEFAULT_NOTICE_DURATION`].
    pub fn show_default(now: Instant) -> Self {
        Self::show(now, DEFAULT_NOTICE_DURATION)
    }

    /// Whether the notice is still visible at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }

    /// Time left before the notice reverts.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }

    /// Message shown while visible.
    pub fn message(&self) -> &'static str {
        "Proceeding to checkout..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_visible_until_duration_elapses() {
        let start = Instant::now();
        let notice = CheckoutNotice::show(start, Duration::from_secs(3));

        assert!(notice.is_visible(start));
        assert!(notice.is_visible(start + Duration::from_millis(2999)));
        assert!(!notice.is_visible(start + Duration::from_secs(3)));
        assert!(!notice.is_visible(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_notice_remaining() {
        let start = Instant::now();
        let notice = CheckoutNotice::show_default(start);

        assert_eq!(notice.remaining(start), DEFAULT_NOTICE_DURATION);
        assert_eq!(
            notice.remaining(start + Duration::from_secs(1)),
            Duration::from_secs(2)
        );
        assert_eq!(notice.remaining(start + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_zero_duration_is_never_visible() {
        let start = Instant::now();
        let notice = CheckoutNotice::show(start, Duration::ZERO);
        assert!(!notice.is_visible(start));
    }
}
