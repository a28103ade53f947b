//! Order summary calculation.

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default subtotal above which shipping is free, in major units.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: f64 = 1000.0;
/// Default flat shipping fee, in major units.
pub const DEFAULT_FLAT_SHIPPING_FEE: f64 = 50.0;
/// Default tax rate applied to the subtotal.
pub const DEFAULT_TAX_RATE: f64 = 0.18;

/// Pricing policy values used to derive an [`OrderSummary`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricingPolicy {
    /// Currency every cart line is priced in.
    pub currency: Currency,
    /// Subtotal strictly above this ships free.
    pub free_shipping_threshold: Money,
    /// Shipping fee charged on non-empty carts at or below the threshold.
    pub flat_shipping_fee: Money,
    /// Tax rate applied to the subtotal only (0.18 = 18%).
    pub tax_rate: f64,
}

impl PricingPolicy {
    /// Default policy values expressed in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            free_shipping_threshold: Money::from_decimal(DEFAULT_FREE_SHIPPING_THRESHOLD, currency),
            flat_shipping_fee: Money::from_decimal(DEFAULT_FLAT_SHIPPING_FEE, currency),
            tax_rate: DEFAULT_TAX_RATE,
        }
    }

    /// Check the policy values are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.free_shipping_threshold.currency != self.currency
            || self.flat_shipping_fee.currency != self.currency
        {
            return Err(CommerceError::Validation(format!(
                "shipping amounts must be in {}",
                self.currency
            )));
        }
        if self.free_shipping_threshold.is_negative() {
            return Err(CommerceError::Validation(
                "free shipping threshold must not be negative".to_string(),
            ));
        }
        if self.flat_shipping_fee.is_negative() {
            return Err(CommerceError::Validation(
                "flat shipping fee must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(CommerceError::Validation(format!(
                "tax rate must be between 0 and 1, got {}",
                self.tax_rate
            )));
        }
        Ok(())
    }

    /// Tax rate as a percentage label, e.g. "18%".
    pub fn tax_percent_label(&self) -> String {
        let percent = self.tax_rate * 100.0;
        if (percent - percent.round()).abs() < 1e-9 {
            format!("{}%", percent.round() as i64)
        } else {
            format!("{:.2}%", percent)
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// Derived totals for a set of cart lines.
///
/// Never stored; recompute from the current lines whenever needed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Shipping fee.
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
}

impl OrderSummary {
    /// All-zero summary.
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            shipping: zero,
            tax: zero,
            total: zero,
        }
    }

    /// Compute the summary for `lines` under `policy`.
    ///
    /// Lines are assumed to be priced in the policy currency. Arithmetic
    /// saturates instead of overflowing.
    pub fn from_lines(lines: &[CartLine], policy: &PricingPolicy) -> Self {
        let subtotal = lines
            .iter()
            .fold(Money::zero(policy.currency), |acc, line| {
                acc.saturating_add(&line.line_total())
            });

        let shipping = if subtotal.is_zero()
            || subtotal.amount_cents > policy.free_shipping_threshold.amount_cents
        {
            Money::zero(policy.currency)
        } else {
            Money::new(policy.flat_shipping_fee.amount_cents, policy.currency)
        };

        let tax = subtotal.multiply_decimal(policy.tax_rate);
        let total = subtotal.saturating_add(&shipping).saturating_add(&tax);

        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }

    /// Whether a non-empty order ships free.
    pub fn is_free_shipping(&self) -> bool {
        self.subtotal.is_positive() && self.shipping.is_zero()
    }
}
