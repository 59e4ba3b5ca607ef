//! # SubscriptionList - the facade bound to one identifier.
//!
//! A [`SubscriptionList`] is a cheap, disposable view: an identifier plus a
//! reference to the [`Registry`] that owns the records. It owns nothing and
//! may be recreated freely; two lists with the same identifier over the same
//! registry address the same subscriber sequence.
//!
//! ## Example
//! ```rust
//! use std::any::Any;
//! use herald::{Extras, FnSubscriber, Registry, SubscriptionList, Value};
//!
//! let registry = Registry::new();
//! let orders = SubscriptionList::new(&registry, "orders");
//!
//! orders.register(1, FnSubscriber::arc(|_p: &dyn Any, _e: &Extras| {
//!     Ok(Box::new(()) as Value)
//! }));
//!
//! assert_eq!(orders.subscribers().len(), 1);
//! assert_eq!(orders, SubscriptionList::new(&registry, "orders"));
//! orders.dispatch(&(), &Extras::new()).unwrap();
//! ```

use std::any::Any;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::registry::registry::Registry;
use crate::registry::subscription::Subscription;
use crate::subscribers::{Extras, SubscriberRef};

/// Stateless view over one identifier's subscription sequence.
#[derive(Clone)]
pub struct SubscriptionList<'r> {
    registry: &'r Registry,
    identifier: Arc<str>,
}

impl<'r> SubscriptionList<'r> {
    /// Creates a view bound to `identifier`. No registry entry is created
    /// until the first registration.
    pub fn new(registry: &'r Registry, identifier: impl Into<Arc<str>>) -> Self {
        Self {
            registry,
            identifier: identifier.into(),
        }
    }

    /// The identifier this list is bound to.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The registry this list reads from and writes to.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Records a subscription with an explicit priority; returns the handle.
    pub fn register(&self, priority: i32, subscriber: SubscriberRef) -> Subscription {
        self.registry.register(&self.identifier, priority, subscriber)
    }

    /// Records a subscription at the registry's default priority.
    pub fn subscribe(&self, subscriber: SubscriberRef) -> Subscription {
        self.register(self.registry.config().default_priority, subscriber)
    }

    /// Snapshot of the current subscriptions, in dispatch order.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.registry.subscriptions(&self.identifier)
    }

    /// Snapshot of the current subscribers, in dispatch order.
    pub fn subscribers(&self) -> Vec<SubscriberRef> {
        self.registry.subscribers(&self.identifier)
    }

    /// Invokes every subscriber in order with the same payload and extras.
    /// See [`Registry::dispatch`].
    pub fn dispatch(&self, payload: &dyn Any, extras: &Extras) -> Result<(), DispatchError> {
        self.registry.dispatch(&self.identifier, payload, extras)
    }

    /// Pre-binds named dependencies into the current subscribers.
    /// See [`Registry::inject_dependencies`].
    pub fn inject_dependencies(&self, dependencies: &Extras) {
        self.registry.inject_dependencies(&self.identifier, dependencies)
    }
}

impl PartialEq for SubscriptionList<'_> {
    /// Equal iff bound to the same identifier over the same registry.
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.registry, other.registry) && self.identifier == other.identifier
    }
}

impl Eq for SubscriptionList<'_> {}

impl fmt::Debug for SubscriptionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionList(\"{}\")", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::subscribers::{FnSubscriber, Value};
    use parking_lot::Mutex;

    fn noop() -> SubscriberRef {
        FnSubscriber::arc(|_p: &dyn Any, _e: &Extras| Ok(Box::new(()) as Value))
    }

    #[test]
    fn test_equality_same_identifier_same_registry() {
        let reg = Registry::new();
        let other = Registry::new();

        assert_eq!(
            SubscriptionList::new(&reg, "orders"),
            SubscriptionList::new(&reg, "orders")
        );
        assert_ne!(
            SubscriptionList::new(&reg, "orders"),
            SubscriptionList::new(&reg, "billing")
        );
        assert_ne!(
            SubscriptionList::new(&reg, "orders"),
            SubscriptionList::new(&other, "orders")
        );
    }

    #[test]
    fn test_two_views_share_one_sequence() {
        let reg = Registry::new();
        let a = SubscriptionList::new(&reg, "orders");
        let b = SubscriptionList::new(&reg, "orders");

        a.register(0, noop());
        assert_eq!(b.subscribers().len(), 1);
    }

    #[test]
    fn test_subscribe_uses_configured_default_priority() {
        let reg = Registry::with_config(RegistryConfig {
            default_priority: 7,
            ..RegistryConfig::default()
        });
        let list = SubscriptionList::new(&reg, "orders");

        let sub = list.subscribe(noop());
        assert_eq!(sub.priority(), 7);
        assert_eq!(sub.identifier(), "orders");
    }

    #[test]
    fn test_dispatch_passes_extras_through() {
        let reg = Registry::new();
        let list = SubscriptionList::new(&reg, "orders");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen2 = Arc::clone(&seen);
        list.register(
            0,
            FnSubscriber::arc(move |_p: &dyn Any, extras: &Extras| {
                seen2.lock().push(extras.get::<u32>("attempt").copied());
                Ok(Box::new(()) as Value)
            }),
        );

        list.dispatch(&(), &Extras::new().with("attempt", 2u32)).unwrap();
        assert_eq!(*seen.lock(), vec![Some(2u32)]);
    }
}
