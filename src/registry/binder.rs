//! # Dependency binding: partial application of named collaborators.
//!
//! [`BoundSubscriber`] wraps a subscriber together with a fixed set of named
//! values. Every future call sees those values merged into its extras, so
//! outer code can supply collaborators (loggers, stores, clocks) once
//! instead of threading them through every dispatch site.
//!
//! ## Rules
//! - Only names the inner subscriber declares via `params()` are ever bound
//!   (the registry filters before wrapping).
//! - Dispatch-time extras override bound values on a name clash; chained
//!   binding passes therefore let the newest binding win.
//! - `params()` and `name()` delegate to the inner subscriber, so a bound
//!   subscriber stays rebindable and keeps its identity in errors and logs.

use std::any::Any;

use crate::subscribers::{Extras, Subscribe, SubscriberError, SubscriberRef, Value};

/// A subscriber with a set of named values pre-bound into its extras.
pub(crate) struct BoundSubscriber {
    inner: SubscriberRef,
    bound: Extras,
}

impl BoundSubscriber {
    pub(crate) fn new(inner: SubscriberRef, bound: Extras) -> Self {
        Self { inner, bound }
    }
}

impl Subscribe for BoundSubscriber {
    fn call(&self, payload: &dyn Any, extras: &Extras) -> Result<Value, SubscriberError> {
        let merged = self.bound.overlaid(extras);
        self.inner.call(payload, &merged)
    }

    fn params(&self) -> &[&'static str] {
        self.inner.params()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
