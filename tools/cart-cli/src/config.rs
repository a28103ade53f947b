//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use turbo_cart::cart::{
    PricingPolicy, DEFAULT_FLAT_SHIPPING_FEE, DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_TAX_RATE,
};
use turbo_cart::checkout::DEFAULT_NOTICE_DURATION;
use turbo_cart::{Currency, Money, DEFAULT_CART_KEY};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// Where the cart is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Pricing policy.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Checkout notice.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl CartConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Build the pricing policy described by `[pricing]`.
    pub fn to_policy(&self) -> Result<PricingPolicy> {
        let currency = Currency::from_code(&self.pricing.currency)
            .ok_or_else(|| anyhow!("Unknown currency code: {}", self.pricing.currency))?;

        let policy = PricingPolicy {
            currency,
            free_shipping_threshold: Money::from_decimal(
                self.pricing.free_shipping_threshold,
                currency,
            ),
            flat_shipping_fee: Money::from_decimal(self.pricing.flat_shipping_fee, currency),
            tax_rate: self.pricing.tax_rate,
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the cart file, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".cart".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

/// Pricing configuration, amounts in major units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Subtotal strictly above this ships free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    /// Flat shipping fee below the threshold.
    #[serde(default = "default_flat_shipping_fee")]
    pub flat_shipping_fee: f64,

    /// Tax rate applied to the subtotal.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

fn default_free_shipping_threshold() -> f64 {
    DEFAULT_FREE_SHIPPING_THRESHOLD
}

fn default_flat_shipping_fee() -> f64 {
    DEFAULT_FLAT_SHIPPING_FEE
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping_fee: default_flat_shipping_fee(),
            tax_rate: default_tax_rate(),
        }
    }
}

/// Checkout notice configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Seconds the "proceeding to checkout" notice stays up.
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
}

fn default_notice_secs() -> u64 {
    DEFAULT_NOTICE_DURATION.as_secs()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            notice_secs: default_notice_secs(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cart configuration

[storage]
# Directory holding the cart file
dir = "{dir}"
key = "{key}"

[pricing]
currency = "{currency}"
# Orders with a subtotal strictly above this ship free
free_shipping_threshold = {threshold:.1}
flat_shipping_fee = {fee:.1}
tax_rate = {tax}

[checkout]
notice_secs = {notice}
"#,
        dir = default_storage_dir(),
        key = default_storage_key(),
        currency = default_currency(),
        threshold = DEFAULT_FREE_SHIPPING_THRESHOLD,
        fee = DEFAULT_FLAT_SHIPPING_FEE,
        tax = DEFAULT_TAX_RATE,
        notice = default_notice_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_policy() {
        let policy = CartConfig::default().to_policy().unwrap();
        assert_eq!(policy, PricingPolicy::default());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CartConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CartConfig = toml::from_str(
            r#"
            [pricing]
            currency = "usd"
            tax_rate = 0.07
            "#,
        )
        .unwrap();

        assert_eq!(config.storage, StorageConfig::default());
        let policy = config.to_policy().unwrap();
        assert_eq!(policy.currency, Currency::USD);
        assert_eq!(policy.flat_shipping_fee, Money::new(5000, Currency::USD));
        assert_eq!(policy.tax_rate, 0.07);
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let mut config = CartConfig::default();
        config.pricing.currency = "XYZ".to_string();
        assert!(config.to_policy().is_err());
    }

    #[test]
    fn test_invalid_tax_rate_rejected() {
        let mut config = CartConfig::default();
        config.pricing.tax_rate = 1.5;
        assert!(config.to_policy().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"storage": {"key": "cart:guest"}}"#).unwrap();

        let config = CartConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.key, "cart:guest");
        assert_eq!(config.storage.dir, ".cart");
    }
}
