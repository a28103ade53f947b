//! Client-side shopping cart store for TurboCommerce storefronts.
//!
//! This crate holds the only stateful piece of a storefront page: the cart.
//!
//! - **Catalog**: the [`Product`] values handed over by the catalog
//! - **Cart**: ordered cart lines, pricing policy, order summary
//! - **Store**: [`CartStore`], which owns the cart, persists it to a
//!   [`turbo_cache::KvStore`] after every mutation and notifies observers
//! - **Checkout**: the fire-and-forget checkout hand-off signal
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{Cache, MemoryStore};
//! use turbo_cart::prelude::*;
//!
//! let mut store = CartStore::open(Cache::new(MemoryStore::new()), PricingPolicy::default());
//!
//! let _sub = store.subscribe(|lines| {
//!     // re-render with the new lines
//!     let _ = lines.len();
//! });
//!
//! let mug = Product::new("mug", "Coffee Mug", Money::from_decimal(500.0, Currency::INR));
//! store.add_line(mug, 2).unwrap();
//!
//! let summary = store.summary();
//! assert_eq!(summary.total.display(), "\u{20b9}1230.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod observer;
pub mod store;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use store::{CartStore, PersistStatus, DEFAULT_CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::Product;

    // Cart
    pub use crate::cart::{Cart, CartLine, OrderSummary, PricingPolicy};

    // Store
    pub use crate::observer::Subscription;
    pub use crate::store::{CartStore, PersistStatus, DEFAULT_CART_KEY};

    // Checkout
    pub use crate::checkout::{CheckoutNotice, CheckoutRequest};
}
