//! # Dispatch policies: Event (multicast) and Command (single handler).
//!
//! Both policies sit on a [`TypedList`](crate::TypedList) keyed by the
//! concrete event/command type.
//!
//! ## Contents
//! - [`Event`] zero-or-more handlers, notify multicasts, no return value
//! - [`Command`] exactly one handler, execute returns its reply
//! - [`PayloadTypeError`] raised when a typed handler receives a payload of
//!   a different type (possible only through hierarchy dispatch or raw
//!   registration against the wrong identifier)
//!
//! ## Quick reference
//! | Policy    | Handlers | Zero handlers | Return        |
//! |-----------|----------|---------------|---------------|
//! | `Event`   | any      | no-op         | none          |
//! | `Command` | exactly 1| `NoHandler`   | handler reply |
//!
//! Dispatch is synchronous and fail-fast: the first handler error aborts the
//! remainder and propagates to the caller.

mod command;
mod event;

use std::any::Any;
use std::fmt;

use crate::subscribers::SubscriberError;

pub use command::Command;
pub use event::Event;

/// A typed handler received a payload that is not its subscribed type.
#[derive(Debug)]
pub struct PayloadTypeError {
    expected: &'static str,
}

impl PayloadTypeError {
    /// The fully-qualified name of the type the handler expected.
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

impl fmt::Display for PayloadTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payload is not a '{}'", self.expected)
    }
}

impl std::error::Error for PayloadTypeError {}

/// Downcasts a dispatched payload for a typed handler.
pub(crate) fn downcast_payload<T: Any>(payload: &dyn Any) -> Result<&T, SubscriberError> {
    payload.downcast_ref::<T>().ok_or_else(|| {
        Box::new(PayloadTypeError {
            expected: std::any::type_name::<T>(),
        }) as SubscriberError
    })
}
