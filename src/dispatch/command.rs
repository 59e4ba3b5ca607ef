//! # Command - single-destination dispatch with a returned reply.
//!
//! A command type opts in with `impl Command for T { type Reply = ...; }`.
//! Exactly one handler may register for a command type; `execute` invokes it
//! with the command instance plus optional named extras and returns its
//! reply.
//!
//! ## Rules
//! - A second registration is rejected at registration time
//!   ([`SubscribeError::TooManyHandlers`]); the first handler stays sole.
//! - Execution with zero handlers fails with [`DispatchError::NoHandler`].
//! - The exactly-one rule is enforced redundantly at execution, so it holds
//!   even when handlers arrive through the raw list API.
//!
//! ## Example
//! ```rust
//! use herald::{topic, Command, Extras, Registry};
//!
//! struct Echo { text: String }
//! topic!(Echo);
//! impl Command for Echo { type Reply = String; }
//!
//! let registry = Registry::new();
//! Echo::subscribe(&registry, |cmd: &Echo, _extras: &Extras| Ok(cmd.text.clone()))?;
//!
//! let reply = Echo { text: "hello".into() }.execute(&registry)?;
//! assert_eq!(reply, "hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::dispatch::downcast_payload;
use crate::error::{DispatchError, SubscribeError};
use crate::registry::{Registry, Subscription};
use crate::subscribers::{Extras, FnSubscriber, SubscriberError, Value};
use crate::topics::{Topic, TypedList};

/// Single-destination dispatch policy: exactly one handler, returns its reply.
pub trait Command: Topic + Sized + 'static {
    /// The reply type the handler produces and `execute` returns.
    type Reply: Send + 'static;

    /// Registers the handler for this command type.
    ///
    /// Fails with [`SubscribeError::TooManyHandlers`] if a handler is
    /// already registered; the existing registration is left unchanged.
    fn subscribe<F>(registry: &Registry, handler: F) -> Result<Subscription, SubscribeError>
    where
        F: Fn(&Self, &Extras) -> Result<Self::Reply, SubscriberError> + Send + Sync + 'static,
    {
        Self::subscribe_with_params(registry, &[], handler)
    }

    /// Registers the handler, additionally declaring bindable parameter
    /// names for [`inject_dependencies`](Command::inject_dependencies).
    fn subscribe_with_params<F>(
        registry: &Registry,
        params: &[&'static str],
        handler: F,
    ) -> Result<Subscription, SubscribeError>
    where
        F: Fn(&Self, &Extras) -> Result<Self::Reply, SubscriberError> + Send + Sync + 'static,
    {
        let subscriber = FnSubscriber::new(move |payload: &dyn Any, extras: &Extras| {
            let command = downcast_payload::<Self>(payload)?;
            let reply = handler(command, extras)?;
            Ok(Box::new(reply) as Value)
        })
        .with_params(params);

        let list = TypedList::of::<Self>(registry);
        registry.register_sole(
            list.identifier(),
            registry.config().default_priority,
            Arc::new(subscriber),
        )
    }

    /// Pre-binds named collaborators into this command type's current
    /// handler; see [`Registry::inject_dependencies`].
    fn inject_dependencies(registry: &Registry, dependencies: &Extras) {
        TypedList::of::<Self>(registry).inject_dependencies(dependencies);
    }

    /// Invokes the single handler with this command instance and returns its
    /// reply unmodified.
    fn execute(&self, registry: &Registry) -> Result<Self::Reply, DispatchError> {
        self.execute_with(registry, &Extras::new())
    }

    /// [`Command::execute`] with extra named arguments for the handler.
    fn execute_with(
        &self,
        registry: &Registry,
        extras: &Extras,
    ) -> Result<Self::Reply, DispatchError> {
        let list = TypedList::for_instance(registry, self);
        let subscriptions = list.subscriptions();

        let subscription = match subscriptions.as_slice() {
            [] => {
                return Err(DispatchError::NoHandler {
                    topic: list.identifier().to_string(),
                })
            }
            [one] => one,
            many => {
                return Err(DispatchError::TooManyHandlers {
                    topic: list.identifier().to_string(),
                    count: many.len(),
                })
            }
        };

        let value = subscription
            .subscriber()
            .call(self as &dyn Any, extras)
            .map_err(|source| DispatchError::Subscriber {
                topic: list.identifier().to_string(),
                subscriber: subscription.subscriber().name(),
                source,
            })?;

        value
            .downcast::<Self::Reply>()
            .map(|reply| *reply)
            .map_err(|_| DispatchError::ReplyType {
                topic: list.identifier().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    struct Echo {
        text: String,
    }
    crate::topic!(Echo);
    impl Command for Echo {
        type Reply = String;
    }

    struct Silent;
    crate::topic!(Silent);
    impl Command for Silent {
        type Reply = ();
    }

    #[test]
    fn test_execute_returns_handler_reply() {
        let registry = Registry::new();
        Echo::subscribe(&registry, |cmd: &Echo, _e: &Extras| Ok(cmd.text.clone())).unwrap();

        let reply = Echo { text: "hello".into() }.execute(&registry).unwrap();
        assert_eq!(reply, "hello");
    }

    #[test]
    fn test_execute_without_handler_fails() {
        let registry = Registry::new();
        let err = Silent.execute(&registry).unwrap_err();
        assert_eq!(err.as_label(), "dispatch_no_handler");
    }

    #[test]
    fn test_second_subscribe_rejected_first_stays_sole() {
        let registry = Registry::new();
        Echo::subscribe(&registry, |cmd: &Echo, _e: &Extras| Ok(cmd.text.clone())).unwrap();

        let err = Echo::subscribe(&registry, |_cmd: &Echo, _e: &Extras| {
            Ok("usurper".to_string())
        })
        .unwrap_err();
        assert_eq!(err.as_label(), "subscribe_too_many_handlers");

        // the first handler still executes
        let reply = Echo { text: "still here".into() }.execute(&registry).unwrap();
        assert_eq!(reply, "still here");
    }

    #[test]
    fn test_execute_rejects_multiple_handlers_from_raw_path() {
        use crate::subscribers::FnSubscriber;

        let registry = Registry::new();
        let list = TypedList::of::<Silent>(&registry);
        // bypass Command::subscribe on purpose
        for _ in 0..2 {
            list.register(
                0,
                FnSubscriber::arc(|_p: &dyn Any, _e: &Extras| Ok(Box::new(()) as Value)),
            );
        }

        let err = Silent.execute(&registry).unwrap_err();
        assert_eq!(err.as_label(), "dispatch_too_many_handlers");
    }

    #[test]
    fn test_execute_propagates_handler_error() {
        let registry = Registry::new();
        Echo::subscribe(&registry, |_cmd: &Echo, _e: &Extras| {
            Err("storage unavailable".into())
        })
        .unwrap();

        let err = Echo { text: "x".into() }.execute(&registry).unwrap_err();
        assert_eq!(err.as_label(), "dispatch_subscriber_failed");
        assert_eq!(
            err.into_subscriber_source().unwrap().to_string(),
            "storage unavailable"
        );
    }

    #[test]
    fn test_execute_rejects_foreign_reply_type() {
        use crate::subscribers::FnSubscriber;

        let registry = Registry::new();
        let list = TypedList::of::<Echo>(&registry);
        list.register(
            0,
            FnSubscriber::arc(|_p: &dyn Any, _e: &Extras| Ok(Box::new(17u64) as Value)),
        );

        let err = Echo { text: "x".into() }.execute(&registry).unwrap_err();
        assert_eq!(err.as_label(), "dispatch_reply_type");
    }

    #[test]
    fn test_injected_dependency_reaches_command_handler() {
        let registry = Registry::new();
        let printed = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&printed);
        Echo::subscribe_with_params(&registry, &["prefix"], move |cmd: &Echo, extras: &Extras| {
            let prefix = extras.get::<&str>("prefix").copied().unwrap_or("");
            sink.lock().push(format!("{prefix}{}", cmd.text));
            Ok(cmd.text.clone())
        })
        .unwrap();

        Echo::inject_dependencies(&registry, &Extras::new().with("prefix", "> "));

        Echo { text: "hi".into() }.execute(&registry).unwrap();
        assert_eq!(*printed.lock(), vec!["> hi".to_string()]);
    }
}
