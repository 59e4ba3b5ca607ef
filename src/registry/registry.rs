//! # Registry - the single source of truth for subscriptions.
//!
//! [`Registry`] maps identifier strings to priority-ordered subscription
//! lists. Facades ([`SubscriptionList`](crate::SubscriptionList),
//! [`TypedList`](crate::TypedList)) are stateless views over it.
//!
//! ## Rules
//! - An absent identifier behaves as an empty list; entries are created
//!   lazily on first registration and live as long as the registry.
//! - Every mutation re-establishes the ordering invariant: priority
//!   ascending, stable on ties.
//! - Dispatch snapshots the list first and invokes outside the lock, so a
//!   handler may register further subscribers without deadlock and without
//!   extending the in-flight dispatch.
//! - Cross-operation atomicity (e.g. register-then-bind) is the caller's
//!   discipline; see the crate docs' concurrency section.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::RwLock;

use crate::config::RegistryConfig;
use crate::error::{DispatchError, SubscribeError};
use crate::registry::binder::BoundSubscriber;
use crate::registry::subscription::Subscription;
use crate::subscribers::{Extras, SubscriberRef};

/// Mapping from identifier to its ordered subscription list.
///
/// Create one per application or test scope; there is no process-global
/// instance. Sharing by reference is safe - the interior is lock-protected -
/// but the engine itself is synchronous and makes no ordering promises
/// across threads.
pub struct Registry {
    lists: RwLock<HashMap<Arc<str>, Vec<Subscription>>>,
    config: RegistryConfig,
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the registry's configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Records a subscription under `identifier` and returns the handle.
    ///
    /// The list is re-sorted by priority ascending after the append; equal
    /// priorities keep their registration order. No uniqueness constraint:
    /// the same subscriber registered twice is invoked once per registration.
    pub fn register(
        &self,
        identifier: &str,
        priority: i32,
        subscriber: SubscriberRef,
    ) -> Subscription {
        let id: Arc<str> = Arc::from(identifier);
        let sub = Subscription::new(Arc::clone(&id), priority, subscriber);

        let mut lists = self.lists.write();
        let list = lists
            .entry(id)
            .or_insert_with(|| Vec::with_capacity(self.config.list_capacity));
        list.push(sub.clone());
        list.sort_by_key(Subscription::priority);

        trace!(
            "registered subscriber '{}' under '{}' (priority {}, {} total)",
            sub.subscriber().name(),
            identifier,
            priority,
            list.len()
        );
        sub
    }

    /// Records a subscription under `identifier` only if the list is empty.
    ///
    /// Check and insert happen under one lock; used by the command layer to
    /// enforce its single-handler rule at registration time.
    pub fn register_sole(
        &self,
        identifier: &str,
        priority: i32,
        subscriber: SubscriberRef,
    ) -> Result<Subscription, SubscribeError> {
        let id: Arc<str> = Arc::from(identifier);

        let mut lists = self.lists.write();
        let list = lists
            .entry(id.clone())
            .or_insert_with(|| Vec::with_capacity(self.config.list_capacity));
        if !list.is_empty() {
            return Err(SubscribeError::TooManyHandlers {
                topic: identifier.to_string(),
            });
        }

        let sub = Subscription::new(id, priority, subscriber);
        list.push(sub.clone());

        trace!(
            "registered sole subscriber '{}' under '{}'",
            sub.subscriber().name(),
            identifier
        );
        Ok(sub)
    }

    /// Returns a snapshot of the subscriptions under `identifier`, in
    /// dispatch order. Absent identifiers yield an empty vector.
    pub fn subscriptions(&self, identifier: &str) -> Vec<Subscription> {
        self.lists
            .read()
            .get(identifier)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns a snapshot of the subscribers under `identifier`, in
    /// dispatch order.
    pub fn subscribers(&self, identifier: &str) -> Vec<SubscriberRef> {
        self.lists
            .read()
            .get(identifier)
            .map(|list| list.iter().map(|s| Arc::clone(s.subscriber())).collect())
            .unwrap_or_default()
    }

    /// Returns the number of subscriptions under `identifier`.
    pub fn count(&self, identifier: &str) -> usize {
        self.lists.read().get(identifier).map_or(0, Vec::len)
    }

    /// Returns the sorted list of identifiers that have at least one
    /// subscription recorded.
    pub fn identifiers(&self) -> Vec<String> {
        let lists = self.lists.read();
        let mut names: Vec<String> = lists
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(id, _)| id.to_string())
            .collect();
        names.sort_unstable();
        names
    }

    /// Invokes every subscriber under `identifier` in order, passing the
    /// same payload and extras to each. Return values are discarded.
    ///
    /// Iterates a snapshot captured when the call begins: subscribers added
    /// mid-dispatch (by a handler's side effect) are not invoked by this
    /// call. The first subscriber error aborts the remainder and propagates.
    pub fn dispatch(
        &self,
        identifier: &str,
        payload: &dyn Any,
        extras: &Extras,
    ) -> Result<(), DispatchError> {
        let snapshot = self.subscriptions(identifier);
        trace!("dispatching '{}' to {} subscriber(s)", identifier, snapshot.len());

        for sub in &snapshot {
            sub.subscriber().call(payload, extras).map_err(|source| {
                DispatchError::Subscriber {
                    topic: identifier.to_string(),
                    subscriber: sub.subscriber().name(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Rewrites every subscription under `identifier`, pre-binding the
    /// subset of `dependencies` whose names each subscriber declares.
    ///
    /// Wholesale replacement: priorities and order are preserved, subscriber
    /// references are swapped for bound variants. Subscribers declaring none
    /// of the supplied names are left untouched; names a subscriber does not
    /// declare are silently ignored for it. Call after all registrations for
    /// the identifier are complete; a later call rebinds the then-current
    /// subscribers, and the newest binding wins for matched names.
    pub fn inject_dependencies(&self, identifier: &str, dependencies: &Extras) {
        let mut lists = self.lists.write();
        let Some(list) = lists.get_mut(identifier) else {
            return;
        };

        let mut bound = 0usize;
        let rebuilt = list
            .iter()
            .map(|sub| {
                let matched = dependencies.filtered(sub.subscriber().params());
                if matched.is_empty() {
                    sub.clone()
                } else {
                    bound += 1;
                    sub.rebind(Arc::new(BoundSubscriber::new(
                        Arc::clone(sub.subscriber()),
                        matched,
                    )))
                }
            })
            .collect();
        *list = rebuilt;

        debug!(
            "bound dependencies {:?} into {}/{} subscriber(s) under '{}'",
            dependencies,
            bound,
            list.len(),
            identifier
        );
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("identifiers", &self.lists.read().len())
            .finish()
    }
}
