//! Type-safe Key-Value storage layer for TurboCommerce.
//!
//! Provides a small raw-bytes [`KvStore`] contract with interchangeable
//! backends, and a [`Cache`] wrapper that adds automatic JSON serialization.
//!
//! Backends:
//! - [`MemoryStore`] - in-process map, handy for tests and ephemeral sessions
//! - [`FileStore`] - one file per key inside a directory
//! - `SpinStore` - Spin's Key-Value Store (only on `wasm32`)
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Cart {
//!     items: Vec<String>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let cart = Cart { items: vec!["tea".into()] };
//!
//! cache.set("cart", &cart).unwrap();
//! let loaded: Option<Cart> = cache.get("cart").unwrap();
//! assert_eq!(loaded, Some(cart));
//!
//! cache.delete("cart").unwrap();
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
