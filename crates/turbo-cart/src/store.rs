//! The cart store: single source of truth for cart contents.
//!
//! Every mutation runs the same sequence before returning:
//! 1. update the in-memory cart
//! 2. write the whole cart to the key-value store
//! 3. notify every observer, in registration order, with one shared
//!    snapshot of the new lines
//!
//! A failed write never rolls back step 1. It is logged, recorded in
//! [`PersistStatus`] and reported to `on_persist_error` hooks.
//!
//! Stored lines priced in another currency are held out of view and written
//! back unchanged, so changing the store currency never discards them.

use turbo_cache::{Cache, CacheError, KvStore};

use crate::cart::snapshot::{self, Decoded, SnapshotRef};
use crate::cart::{Cart, CartLine, OrderSummary, PricingPolicy};
use crate::catalog::Product;
use crate::checkout::CheckoutRequest;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::observer::{ObserverRegistry, Subscription};

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Outcome of the most recent write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersistStatus {
    /// Nothing has been written since the store was opened.
    #[default]
    Never,
    /// The cart at `revision` is durable.
    Persisted { revision: u64 },
    /// Writing the cart at `revision` failed.
    Failed { revision: u64, error: String },
}

impl PersistStatus {
    /// Whether the latest write failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, PersistStatus::Failed { .. })
    }
}

/// Owns the cart, persists it, and notifies observers.
///
/// # Example
///
/// ```rust
/// use turbo_cache::{Cache, MemoryStore};
/// use turbo_cart::prelude::*;
///
/// let storage = MemoryStore::new();
/// let mut store = CartStore::open(Cache::new(storage.clone()), PricingPolicy::default());
/// let pen = Product::new("pen", "Pen", Money::from_decimal(20.0, Currency::INR));
/// store.add_line(pen, 3).unwrap();
///
/// // A later session over the same storage sees the same cart.
/// let reopened = CartStore::open(Cache::new(storage), PricingPolicy::default());
/// assert_eq!(reopened.current_lines(), store.current_lines());
/// ```
pub struct CartStore<S: KvStore> {
    cart: Cart,
    held: Vec<CartLine>,
    cache: Cache<S>,
    key: String,
    policy: PricingPolicy,
    revision: u64,
    persist_status: PersistStatus,
    observers: ObserverRegistry<[CartLine]>,
    persist_errors: ObserverRegistry<CacheError>,
    checkout_hooks: ObserverRegistry<CheckoutRequest>,
}

impl<S: KvStore> CartStore<S> {
    /// Open the store under [`DEFAULT_CART_KEY`].
    pub fn open(cache: Cache<S>, policy: PricingPolicy) -> Self {
        Self::open_at(cache, DEFAULT_CART_KEY, policy)
    }

    /// Open the store under a specific key.
    ///
    /// A missing, unreadable or corrupt stored cart yields an empty cart.
    pub fn open_at(cache: Cache<S>, key: impl Into<String>, policy: PricingPolicy) -> Self {
        let key = key.into();
        let Decoded { cart, held } = restore(&cache, &key, policy.currency);

        Self {
            cart,
            held,
            cache,
            key,
            policy,
            revision: 0,
            persist_status: PersistStatus::Never,
            observers: ObserverRegistry::new(),
            persist_errors: ObserverRegistry::new(),
            checkout_hooks: ObserverRegistry::new(),
        }
    }

    /// Add `quantity` of a product.
    ///
    /// An existing line for the same product id is incremented; otherwise a
    /// line is appended. Rejected input leaves the cart untouched and does
    /// not notify.
    pub fn add_line(&mut self, product: Product, quantity: i64) -> Result<(), CommerceError> {
        if product.price.currency != self.policy.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.policy.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        self.cart.add(product, quantity)?;
        self.commit("add_line");
        Ok(())
    }

    /// Add a single unit of a product.
    pub fn add_product(&mut self, product: Product) -> Result<(), CommerceError> {
        self.add_line(product, 1)
    }

    /// Remove the line for `product_id`. A missing line is a no-op that
    /// still persists and notifies.
    pub fn remove_line(&mut self, product_id: &ProductId) {
        let removed = self.cart.remove(product_id);
        if !removed {
            tracing::debug!(product_id = %product_id, "remove_line: product not in cart");
        }
        self.commit("remove_line");
    }

    /// Set the absolute quantity of a line.
    ///
    /// `quantity <= 0` behaves exactly like [`CartStore::remove_line`].
    /// A missing line is left missing.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(product_id);
            return;
        }

        self.cart.set_quantity(product_id, quantity);
        self.commit("set_quantity");
    }

    /// Raise a line's quantity by one.
    ///
    /// Returns `false` without notifying when the product is not in the cart.
    pub fn increment(&mut self, product_id: &ProductId) -> bool {
        let next = self
            .cart
            .get(product_id)
            .and_then(|line| line.quantity.checked_add(1));
        match next {
            Some(quantity) => {
                self.set_quantity(product_id, quantity);
                true
            }
            None => false,
        }
    }

    /// Lower a line's quantity by one, stopping at one.
    ///
    /// Returns `false` without notifying when the product is missing or
    /// already at quantity one.
    pub fn decrement(&mut self, product_id: &ProductId) -> bool {
        match self.cart.get(product_id).map(|line| line.quantity) {
            Some(quantity) if quantity > 1 => {
                self.set_quantity(product_id, quantity - 1);
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit("clear");
    }

    /// Current lines in stored order.
    pub fn current_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Owned copy of the current lines.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.cart.lines().to_vec()
    }

    /// Stored lines priced in another currency.
    ///
    /// They are not part of the cart or its summary, and every save writes
    /// them back as they were loaded.
    pub fn held_lines(&self) -> &[CartLine] {
        &self.held
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.cart.get(product_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    /// Order summary for the current lines.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_lines(self.cart.lines(), &self.policy)
    }

    /// Pricing policy in use.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> Currency {
        self.policy.currency
    }

    /// Storage key of this cart.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of mutations applied since the store was opened.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Outcome of the latest write.
    pub fn persist_status(&self) -> &PersistStatus {
        &self.persist_status
    }

    /// Number of registered cart observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Register a cart observer.
    ///
    /// The observer is called right away with the current lines, then after
    /// every mutation.
    pub fn subscribe<F>(&self, mut observer: F) -> Subscription
    where
        F: FnMut(&[CartLine]) + 'static,
    {
        observer(self.cart.lines());
        self.observers.register(observer)
    }

    /// Register a hook called whenever writing the cart fails.
    pub fn on_persist_error<F>(&self, hook: F) -> Subscription
    where
        F: FnMut(&CacheError) + 'static,
    {
        self.persist_errors.register(hook)
    }

    /// Register a hook called on every checkout request.
    pub fn on_checkout<F>(&self, hook: F) -> Subscription
    where
        F: FnMut(&CheckoutRequest) + 'static,
    {
        self.checkout_hooks.register(hook)
    }

    /// Signal that the shopper is proceeding to checkout.
    ///
    /// Fire-and-forget: the request goes to every checkout hook and is also
    /// returned. The cart itself is not changed.
    pub fn proceed_to_checkout(&self) -> CheckoutRequest {
        let request = CheckoutRequest {
            lines: self.snapshot(),
            summary: self.summary(),
            revision: self.revision,
        };

        tracing::info!(
            lines = request.lines.len(),
            total = %request.summary.total,
            "proceeding to checkout"
        );
        self.checkout_hooks.notify(&request);
        request
    }

    fn commit(&mut self, action: &'static str) {
        self.revision += 1;
        self.persist();

        let notified = self.observers.notify(self.cart.lines());
        tracing::debug!(
            action,
            revision = self.revision,
            lines = self.cart.line_count(),
            items = self.cart.item_count(),
            notified,
            "cart updated"
        );
    }

    fn persist(&mut self) {
        let snapshot = SnapshotRef::new(self.cart.lines(), &self.held);
        match self.cache.set(&self.key, &snapshot) {
            Ok(()) => {
                self.persist_status = PersistStatus::Persisted {
                    revision: self.revision,
                };
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    revision = self.revision,
                    error = %e,
                    "failed to persist cart; keeping in-memory state"
                );
                self.persist_status = PersistStatus::Failed {
                    revision: self.revision,
                    error: e.to_string(),
                };
                self.persist_errors.notify(&e);
            }
        }
    }
}

/// Load the stored cart, falling back to empty on any failure.
fn restore<S: KvStore>(cache: &Cache<S>, key: &str, currency: Currency) -> Decoded {
    let bytes = match cache.get_raw(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Decoded::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored cart; starting empty");
            return Decoded::default();
        }
    };

    match snapshot::decode(&bytes, currency) {
        Ok(decoded) => {
            tracing::debug!(
                key,
                lines = decoded.cart.line_count(),
                held = decoded.held.len(),
                "restored cart"
            );
            decoded
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored cart is unreadable; starting empty");
            Decoded::default()
        }
    }
}
