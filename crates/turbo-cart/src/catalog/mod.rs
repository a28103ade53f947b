//! Product catalog module.
//!
//! The cart never owns the catalog; it only keeps copies of the products
//! handed to it.

mod product;

pub use product::Product;
