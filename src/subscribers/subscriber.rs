//! # The subscriber calling contract.
//!
//! [`Subscribe`] is the single signature every subscriber implements: a
//! type-erased payload (the event or command instance) plus an [`Extras`]
//! map as the fixed extension point for named arguments.
//!
//! ## Rules
//! - Subscribers run synchronously, in the dispatcher's call stack.
//! - A returned error aborts the in-flight dispatch and propagates to the
//!   caller unmodified; the engine never catches or retries.
//! - [`Subscribe::params`] declares which named dependencies the subscriber
//!   accepts; the binder consults this list instead of inspecting the
//!   callable (see [`Registry::inject_dependencies`](crate::Registry::inject_dependencies)).
//!
//! ## Implementing custom subscribers
//! ```rust
//! use std::any::Any;
//! use herald::{Extras, Subscribe, SubscriberError, Value};
//!
//! struct Counter;
//!
//! impl Subscribe for Counter {
//!     fn call(&self, _payload: &dyn Any, _extras: &Extras) -> Result<Value, SubscriberError> {
//!         // count something...
//!         Ok(Box::new(()) as Value)
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//! ```

use std::any::Any;
use std::sync::Arc;

use super::extras::Extras;

/// Type-erased value returned by a subscriber (commands return it to the caller).
pub type Value = Box<dyn Any + Send>;

/// Error raised inside a subscriber; propagated to the dispatch caller unmodified.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// Shared handle to a subscriber.
pub type SubscriberRef = Arc<dyn Subscribe>;

/// A callable registered to receive dispatch.
///
/// One explicit contract for every subscriber kind: event handlers ignore
/// the returned [`Value`], command handlers' value is handed back to the
/// executor.
pub trait Subscribe: Send + Sync + 'static {
    /// Invokes the subscriber with the dispatched payload and named extras.
    fn call(&self, payload: &dyn Any, extras: &Extras) -> Result<Value, SubscriberError>;

    /// Declared parameter names this subscriber accepts from dependency binding.
    ///
    /// Only names listed here are pre-bound by
    /// [`inject_dependencies`](crate::Registry::inject_dependencies);
    /// everything else is silently ignored for this subscriber.
    ///
    /// Default: none.
    fn params(&self) -> &[&'static str] {
        &[]
    }

    /// Returns the subscriber name used in errors and logs.
    ///
    /// Prefer short, descriptive names. The default uses `type_name::<Self>()`,
    /// which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Function-backed subscriber.
///
/// Wraps a closure matching the [`Subscribe`] contract and carries the
/// declared parameter names for dependency binding.
///
/// ## Example
/// ```rust
/// use std::any::Any;
/// use herald::{Extras, FnSubscriber, SubscriberRef, Value};
///
/// let s: SubscriberRef = FnSubscriber::arc(|_payload: &dyn Any, extras: &Extras| {
///     let greeting = extras.get::<&str>("greeting").copied().unwrap_or("hi");
///     Ok(Box::new(greeting.to_string()) as Value)
/// });
///
/// assert!(s.params().is_empty());
/// ```
pub struct FnSubscriber<F> {
    name: &'static str,
    params: Vec<&'static str>,
    f: F,
}

impl<F> FnSubscriber<F>
where
    F: Fn(&dyn Any, &Extras) -> Result<Value, SubscriberError> + Send + Sync + 'static,
{
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`FnSubscriber::arc`] when you immediately need a [`SubscriberRef`].
    pub fn new(f: F) -> Self {
        Self {
            name: std::any::type_name::<F>(),
            params: Vec::new(),
            f,
        }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }

    /// Overrides the subscriber name used in errors and logs.
    #[must_use]
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Declares the parameter names this subscriber accepts from dependency binding.
    #[must_use]
    pub fn with_params(mut self, params: &[&'static str]) -> Self {
        self.params = params.to_vec();
        self
    }
}

impl<F> Subscribe for FnSubscriber<F>
where
    F: Fn(&dyn Any, &Extras) -> Result<Value, SubscriberError> + Send + Sync + 'static,
{
    fn call(&self, payload: &dyn Any, extras: &Extras) -> Result<Value, SubscriberError> {
        (self.f)(payload, extras)
    }

    fn params(&self) -> &[&'static str] {
        &self.params
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_subscriber_carries_params_and_name() {
        let s = FnSubscriber::new(|_p: &dyn Any, _e: &Extras| Ok(Box::new(()) as Value))
            .with_name("audit")
            .with_params(&["logger", "clock"]);

        assert_eq!(s.name(), "audit");
        assert_eq!(s.params(), &["logger", "clock"]);
    }

    #[test]
    fn test_fn_subscriber_forwards_call() {
        let s = FnSubscriber::new(|payload: &dyn Any, _e: &Extras| {
            let n = payload.downcast_ref::<i32>().copied().unwrap_or(0);
            Ok(Box::new(n * 2) as Value)
        });

        let out = s.call(&21i32, &Extras::new()).unwrap();
        assert_eq!(out.downcast_ref::<i32>(), Some(&42));
    }
}
