//! Persisted cart format.
//!
//! Current format is a versioned envelope:
//!
//! ```json
//! { "version": 1, "lines": [ { "product": { ... }, "quantity": 2 } ] }
//! ```
//!
//! Older storefront builds wrote a bare array of lines with numeric ids and
//! decimal prices; [`decode`] still reads that form.
//!
//! Lines priced in a currency other than the store's are held back rather
//! than dropped, and written out again unchanged on every save.

use crate::cart::{Cart, CartLine};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Schema version written by this crate.
pub const CART_SCHEMA_VERSION: u32 = 1;

/// Borrowed view serialized on every write.
#[derive(Debug, Serialize)]
pub(crate) struct SnapshotRef<'a> {
    version: u32,
    lines: Vec<&'a CartLine>,
}

impl<'a> SnapshotRef<'a> {
    /// Visible lines first, then held lines.
    pub(crate) fn new(lines: &'a [CartLine], held: &'a [CartLine]) -> Self {
        Self {
            version: CART_SCHEMA_VERSION,
            lines: lines.iter().chain(held).collect(),
        }
    }
}

/// Result of reading a stored cart.
#[derive(Debug, Default)]
pub(crate) struct Decoded {
    /// Normalized lines in the store currency.
    pub(crate) cart: Cart,
    /// Lines in other currencies, kept verbatim.
    pub(crate) held: Vec<CartLine>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Versioned { version: u32, lines: Vec<CartLine> },
    Legacy(Vec<LegacyLine>),
}

#[derive(Debug, Deserialize)]
struct LegacyLine {
    product: LegacyProduct,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct LegacyProduct {
    id: ProductId,
    name: String,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
}

impl LegacyLine {
    fn into_line(self, currency: Currency) -> CartLine {
        let p = self.product;
        let product = Product {
            id: p.id,
            name: p.name,
            price: Money::from_decimal(p.price, currency),
            image: p.image,
            description: p.description,
            category: p.category,
        };
        CartLine::new(product, self.quantity)
    }
}

/// Decode persisted bytes into a normalized cart.
///
/// Legacy prices are read as major units of `currency`. Lines priced in any
/// other currency go to [`Decoded::held`].
pub(crate) fn decode(bytes: &[u8], currency: Currency) -> Result<Decoded, CommerceError> {
    let lines = match serde_json::from_slice::<StoredCart>(bytes)? {
        StoredCart::Versioned { version, lines } => {
            if version > CART_SCHEMA_VERSION {
                return Err(CommerceError::UnsupportedSchemaVersion(version));
            }
            lines
        }
        StoredCart::Legacy(lines) => {
            tracing::debug!(lines = lines.len(), "reading unversioned cart");
            lines.into_iter().map(|l| l.into_line(currency)).collect()
        }
    };

    let (kept, held): (Vec<CartLine>, Vec<CartLine>) = lines
        .into_iter()
        .partition(|l| l.product.price.currency == currency);
    if !held.is_empty() {
        tracing::warn!(
            held = held.len(),
            expected = %currency,
            "stored cart has lines priced in another currency; keeping them out of view"
        );
    }

    Ok(Decoded {
        cart: Cart::from_lines(kept),
        held,
    })
}
