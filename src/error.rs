//! Error types used by the dispatch engine.
//!
//! This module defines two main error enums:
//!
//! - [`SubscribeError`] — errors raised while registering a handler.
//! - [`DispatchError`] — errors raised while dispatching to handlers.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. A failure inside a subscriber is carried through
//! [`DispatchError::Subscriber`] with the original error as its source,
//! untouched; the engine never catches, wraps-for-retry, or continues past it.

use thiserror::Error;

use crate::subscribers::SubscriberError;

/// # Errors produced while registering a handler.
///
/// Registration is infallible for events and plain subscription lists;
/// only the command layer's single-handler rule can reject it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SubscribeError {
    /// A second handler was registered for a command that already has one.
    /// The existing registration is left unchanged.
    #[error("command '{topic}' already has a handler")]
    TooManyHandlers {
        /// Identifier of the command's subscription list.
        topic: String,
    },
}

impl SubscribeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use herald::SubscribeError;
    ///
    /// let err = SubscribeError::TooManyHandlers { topic: "orders::Refund".into() };
    /// assert_eq!(err.as_label(), "subscribe_too_many_handlers");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscribeError::TooManyHandlers { .. } => "subscribe_too_many_handlers",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubscribeError::TooManyHandlers { topic } => {
                format!("handler already registered for command: {topic}")
            }
        }
    }
}

/// # Errors produced while dispatching.
///
/// Multicast event dispatch can only fail through a subscriber's own error
/// ([`DispatchError::Subscriber`]); the remaining variants belong to the
/// command layer's exactly-one-handler contract.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A command was executed with zero handlers registered for its type.
    #[error("no handler registered for command '{topic}'")]
    NoHandler {
        /// Identifier of the command's subscription list.
        topic: String,
    },

    /// A command was executed with more than one handler registered for its
    /// type (possible when handlers were registered through the raw list API).
    #[error("command '{topic}' has {count} handlers; exactly one is required")]
    TooManyHandlers {
        /// Identifier of the command's subscription list.
        topic: String,
        /// Number of handlers found.
        count: usize,
    },

    /// A command handler replied with a value that is not the command's
    /// declared reply type.
    #[error("handler for command '{topic}' replied with an unexpected type")]
    ReplyType {
        /// Identifier of the command's subscription list.
        topic: String,
    },

    /// A subscriber failed during dispatch. The source error is the
    /// subscriber's own error, unmodified; handlers after it were not invoked.
    #[error("subscriber '{subscriber}' failed during dispatch of '{topic}'")]
    Subscriber {
        /// Identifier that was being dispatched.
        topic: String,
        /// Name of the failing subscriber.
        subscriber: &'static str,
        /// The subscriber's error, propagated as-is.
        #[source]
        source: SubscriberError,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use herald::DispatchError;
    ///
    /// let err = DispatchError::NoHandler { topic: "orders::Refund".into() };
    /// assert_eq!(err.as_label(), "dispatch_no_handler");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::NoHandler { .. } => "dispatch_no_handler",
            DispatchError::TooManyHandlers { .. } => "dispatch_too_many_handlers",
            DispatchError::ReplyType { .. } => "dispatch_reply_type",
            DispatchError::Subscriber { .. } => "dispatch_subscriber_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::NoHandler { topic } => format!("no handler for: {topic}"),
            DispatchError::TooManyHandlers { topic, count } => {
                format!("{count} handlers for: {topic}")
            }
            DispatchError::ReplyType { topic } => format!("unexpected reply type for: {topic}"),
            DispatchError::Subscriber { topic, subscriber, source } => {
                format!("subscriber {subscriber} failed for {topic}: {source}")
            }
        }
    }

    /// Recovers the failing subscriber's original error, if this is a
    /// [`DispatchError::Subscriber`].
    pub fn into_subscriber_source(self) -> Option<SubscriberError> {
        match self {
            DispatchError::Subscriber { source, .. } => Some(source),
            _ => None,
        }
    }
}
