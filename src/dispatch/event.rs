//! # Event - multicast dispatch with zero-or-more handlers.
//!
//! An event type opts in with `impl Event for T {}` (after declaring itself
//! a topic). Handlers subscribe under the event type's identifier; `notify`
//! passes the event instance plus optional named extras to every handler in
//! priority order.
//!
//! ## Rules
//! - Zero handlers is not an error; `notify` is a no-op then.
//! - Handlers run synchronously, in the caller's stack, in priority order.
//! - The first handler error aborts the remaining handlers and propagates.
//!
//! ## Example
//! ```rust
//! use herald::{topic, Event, Extras, Registry};
//!
//! struct ProductSold { items: u32 }
//! topic!(ProductSold);
//! impl Event for ProductSold {}
//!
//! let registry = Registry::new();
//!
//! ProductSold::subscribe(&registry, 0, |event: &ProductSold, _extras: &Extras| {
//!     println!("{} product(s) sold", event.items);
//!     Ok(())
//! });
//!
//! ProductSold { items: 2 }.notify(&registry)?;
//! # Ok::<(), herald::DispatchError>(())
//! ```

use std::any::Any;

use crate::dispatch::downcast_payload;
use crate::error::DispatchError;
use crate::registry::{Registry, Subscription};
use crate::subscribers::{Extras, FnSubscriber, SubscriberError, Value};
use crate::topics::{Topic, TypedList};

/// Multicast dispatch policy: any number of handlers, no return value.
pub trait Event: Topic + Sized + 'static {
    /// Registers a typed handler for this event type; returns the handle.
    ///
    /// Lower priorities run earlier; equal priorities keep registration
    /// order.
    fn subscribe<F>(registry: &Registry, priority: i32, handler: F) -> Subscription
    where
        F: Fn(&Self, &Extras) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        Self::subscribe_with_params(registry, priority, &[], handler)
    }

    /// Registers a typed handler that additionally declares bindable
    /// parameter names for
    /// [`inject_dependencies`](Event::inject_dependencies).
    fn subscribe_with_params<F>(
        registry: &Registry,
        priority: i32,
        params: &[&'static str],
        handler: F,
    ) -> Subscription
    where
        F: Fn(&Self, &Extras) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        let subscriber = FnSubscriber::new(move |payload: &dyn Any, extras: &Extras| {
            let event = downcast_payload::<Self>(payload)?;
            handler(event, extras)?;
            Ok(Box::new(()) as Value)
        })
        .with_params(params);
        TypedList::of::<Self>(registry).register(priority, std::sync::Arc::new(subscriber))
    }

    /// Pre-binds named collaborators into this event type's current
    /// handlers; see [`Registry::inject_dependencies`].
    fn inject_dependencies(registry: &Registry, dependencies: &Extras) {
        TypedList::of::<Self>(registry).inject_dependencies(dependencies);
    }

    /// Notifies every handler, passing this event instance, in priority
    /// order. Zero handlers is a no-op.
    fn notify(&self, registry: &Registry) -> Result<(), DispatchError> {
        self.notify_with(registry, &Extras::new())
    }

    /// [`Event::notify`] with extra named arguments for the handlers.
    fn notify_with(&self, registry: &Registry, extras: &Extras) -> Result<(), DispatchError> {
        TypedList::for_instance(registry, self).dispatch(self as &dyn Any, extras)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    struct OrderPlaced {
        qty: u32,
    }
    crate::topic!(OrderPlaced);
    impl Event for OrderPlaced {}

    struct Silent;
    crate::topic!(Silent);
    impl Event for Silent {}

    #[test]
    fn test_notify_runs_handlers_in_priority_order() {
        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        OrderPlaced::subscribe(&registry, 5, move |ev: &OrderPlaced, _e: &Extras| {
            s.lock().push(format!("a:{}", ev.qty));
            Ok(())
        });
        let s = Arc::clone(&seen);
        OrderPlaced::subscribe(&registry, 1, move |ev: &OrderPlaced, _e: &Extras| {
            s.lock().push(format!("b:{}", ev.qty));
            Ok(())
        });

        OrderPlaced { qty: 3 }.notify(&registry).unwrap();
        assert_eq!(*seen.lock(), vec!["b:3".to_string(), "a:3".to_string()]);
    }

    #[test]
    fn test_notify_without_handlers_is_noop() {
        let registry = Registry::new();
        Silent.notify(&registry).unwrap();
    }

    #[test]
    fn test_notify_passes_same_instance_to_each_handler() {
        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..3 {
            let s = Arc::clone(&seen);
            OrderPlaced::subscribe(&registry, 0, move |ev: &OrderPlaced, _e: &Extras| {
                s.lock().push(ev as *const OrderPlaced as usize);
                Ok(())
            });
        }

        OrderPlaced { qty: 1 }.notify(&registry).unwrap();
        let addrs = seen.lock();
        assert_eq!(addrs.len(), 3);
        assert!(addrs.iter().all(|a| *a == addrs[0]));
    }

    #[test]
    fn test_notify_fails_fast_and_propagates() {
        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        OrderPlaced::subscribe(&registry, 0, move |_ev: &OrderPlaced, _e: &Extras| {
            s.lock().push("ran");
            Ok(())
        });
        OrderPlaced::subscribe(&registry, 1, |_ev: &OrderPlaced, _e: &Extras| {
            Err("inventory offline".into())
        });
        let s = Arc::clone(&seen);
        OrderPlaced::subscribe(&registry, 2, move |_ev: &OrderPlaced, _e: &Extras| {
            s.lock().push("never");
            Ok(())
        });

        let err = OrderPlaced { qty: 1 }.notify(&registry).unwrap_err();
        assert_eq!(err.as_label(), "dispatch_subscriber_failed");
        assert_eq!(
            err.into_subscriber_source().unwrap().to_string(),
            "inventory offline"
        );
        assert_eq!(*seen.lock(), vec!["ran"]);
    }

    #[test]
    fn test_injected_dependency_reaches_handler() {
        #[derive(Clone, Copy, PartialEq, Debug)]
        struct FixedClock(u64);

        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        OrderPlaced::subscribe_with_params(
            &registry,
            0,
            &["clock"],
            move |_ev: &OrderPlaced, extras: &Extras| {
                s.lock().push(extras.get::<FixedClock>("clock").copied());
                Ok(())
            },
        );

        OrderPlaced::inject_dependencies(&registry, &Extras::new().with("clock", FixedClock(42)));

        // caller supplies no clock; the bound one arrives
        OrderPlaced { qty: 1 }.notify(&registry).unwrap();
        assert_eq!(*seen.lock(), vec![Some(FixedClock(42))]);
    }

    #[test]
    fn test_notify_with_extras_reaches_handlers() {
        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        OrderPlaced::subscribe(&registry, 0, move |_ev: &OrderPlaced, extras: &Extras| {
            s.lock().push(extras.get::<&str>("source").copied());
            Ok(())
        });

        OrderPlaced { qty: 1 }
            .notify_with(&registry, &Extras::new().with("source", "checkout"))
            .unwrap();
        assert_eq!(*seen.lock(), vec![Some("checkout")]);
    }
}
