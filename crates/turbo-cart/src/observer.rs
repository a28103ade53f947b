//! Observer registry with independently removable subscriptions.
//!
//! Callbacks run in registration order. Each notification round iterates a
//! copy of the registry taken when the round starts, so callbacks may add or
//! remove subscriptions (including their own) without disturbing the round.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Slots<T: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// Ordered collection of callbacks receiving `&T`.
pub struct ObserverRegistry<T: ?Sized> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: ?Sized + 'static> ObserverRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback at the end of the notification order.
    pub fn register<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.entries.push((id, callback));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Invoke every registered callback with `value`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&self, value: &T) -> usize {
        let round: Vec<Callback<T>> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        let mut invoked = 0;
        for callback in round {
            // A callback already running further up the stack is skipped.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)(value);
                invoked += 1;
            }
        }
        invoked
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized + 'static> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.slots.borrow().entries.len())
            .finish()
    }
}

/// Handle returned by a registration.
///
/// Dropping the handle keeps the callback registered; call
/// [`Subscription::unsubscribe`] to remove it. Unsubscribing is idempotent
/// and safe after the registry itself is gone.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the callback from its registry.
    pub fn unsubscribe(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Whether [`Subscription::unsubscribe`] has not been called yet.
    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn FnMut(&i32)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &str| -> Box<dyn FnMut(&i32)> {
            let sink = Rc::clone(&sink);
            let name = name.to_string();
            Box::new(move |v: &i32| sink.borrow_mut().push(format!("{name}:{v}")))
        };
        (log, make)
    }

    #[test]
    fn test_notify_in_registration_order() {
        let registry = ObserverRegistry::<i32>::new();
        let (log, make) = recorder();

        let _a = registry.register(make("a"));
        let _b = registry.register(make("b"));

        assert_eq!(registry.notify(&1), 2);
        assert_eq!(*log.borrow(), vec!["a:1", "b:1"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let registry = ObserverRegistry::<i32>::new();
        let (log, make) = recorder();

        let mut sub = registry.register(make("a"));
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());

        registry.notify(&1);
        assert!(log.borrow().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let registry = ObserverRegistry::<i32>::new();
        let mut sub = registry.register(|_: &i32| {});
        drop(registry);

        sub.unsubscribe();
        sub.unsubscribe();
    }

    #[test]
    fn test_unsubscribe_only_removes_own_entry() {
        let registry = ObserverRegistry::<i32>::new();
        let (log, make) = recorder();

        let _a = registry.register(make("a"));
        let mut b = registry.register(make("b"));
        let _c = registry.register(make("c"));

        b.unsubscribe();
        registry.notify(&7);
        assert_eq!(*log.borrow(), vec!["a:7", "c:7"]);
    }

    #[test]
    fn test_round_uses_snapshot_of_registry() {
        let registry = ObserverRegistry::<i32>::new();
        let (log, make) = recorder();

        // "a" removes "b" during the round; "b" still sees this round only.
        let b_sub: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let b_handle = Rc::clone(&b_sub);
        let mut a_inner = make("a");
        let _a = registry.register(move |v: &i32| {
            a_inner(v);
            if let Some(sub) = b_handle.borrow_mut().as_mut() {
                sub.unsubscribe();
            }
        });
        *b_sub.borrow_mut() = Some(registry.register(make("b")));

        registry.notify(&1);
        registry.notify(&2);
        assert_eq!(*log.borrow(), vec!["a:1", "b:1", "a:2"]);
    }

    #[test]
    fn test_callback_can_unsubscribe_itself() {
        let registry = ObserverRegistry::<i32>::new();
        let calls = Rc::new(RefCell::new(0));

        let own: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let handle = Rc::clone(&own);
        let counter = Rc::clone(&calls);
        let sub = registry.register(move |_: &i32| {
            *counter.borrow_mut() += 1;
            if let Some(sub) = handle.borrow_mut().as_mut() {
                sub.unsubscribe();
            }
        });
        *own.borrow_mut() = Some(sub);

        registry.notify(&1);
        registry.notify(&2);
        assert_eq!(*calls.borrow(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_callback_can_register_during_round() {
        let registry = Rc::new(ObserverRegistry::<i32>::new());
        let (log, make) = recorder();

        let inner = Rc::clone(&registry);
        let pending = RefCell::new(Some(make("late")));
        let _a = registry.register(move |_: &i32| {
            if let Some(cb) = pending.borrow_mut().take() {
                let _ = inner.register(cb);
            }
        });

        registry.notify(&1);
        assert!(log.borrow().is_empty());
        registry.notify(&2);
        assert_eq!(*log.borrow(), vec!["late:2"]);
    }
}
