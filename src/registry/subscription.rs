//! # A single registration record.
//!
//! [`Subscription`] ties an identifier, a priority, and a subscriber
//! together. The registry owns all records; the copy returned by a
//! registration call is the caller's handle to what was recorded.

use std::fmt;
use std::sync::Arc;

use crate::subscribers::SubscriberRef;

/// One `(identifier, priority, subscriber)` registration record.
///
/// Immutable once created. Cloning is cheap (identifier and subscriber are
/// shared handles).
#[derive(Clone)]
pub struct Subscription {
    identifier: Arc<str>,
    priority: i32,
    subscriber: SubscriberRef,
}

impl Subscription {
    pub(crate) fn new(identifier: Arc<str>, priority: i32, subscriber: SubscriberRef) -> Self {
        Self {
            identifier,
            priority,
            subscriber,
        }
    }

    /// Identifier this subscription is grouped under.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Priority; lower values dispatch earlier, ties keep registration order.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The registered subscriber.
    pub fn subscriber(&self) -> &SubscriberRef {
        &self.subscriber
    }

    /// Returns a copy with the subscriber swapped, identifier and priority kept.
    ///
    /// Used by the dependency binder's wholesale rewrite.
    pub(crate) fn rebind(&self, subscriber: SubscriberRef) -> Self {
        Self {
            identifier: Arc::clone(&self.identifier),
            priority: self.priority,
            subscriber,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("identifier", &self.identifier)
            .field("priority", &self.priority)
            .field("subscriber", &self.subscriber.name())
            .finish()
    }
}
