//! Shopping cart module.
//!
//! Contains the cart line types, the pricing policy with its order summary,
//! and the persisted cart format.

mod cart;
mod pricing;
pub(crate) mod snapshot;

pub use cart::{Cart, CartLine};
pub use pricing::{
    OrderSummary, PricingPolicy, DEFAULT_FLAT_SHIPPING_FEE, DEFAULT_FREE_SHIPPING_THRESHOLD,
    DEFAULT_TAX_RATE,
};
pub use snapshot::CART_SCHEMA_VERSION;
