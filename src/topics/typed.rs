//! # TypedList - subscription lists keyed by a type.
//!
//! [`TypedList`] derives its identifier deterministically from a topic's
//! fully-qualified name, optionally prefixed. Constructing it from the type
//! or from an instance of the type yields the same identifier, so both
//! address the same registry entry.
//!
//! Hierarchy-aware operations walk the topic's linearization (see
//! [`TopicMeta::linearize`]): subclass-registered handlers run before
//! superclass-registered handlers, and within one topic, priority order
//! holds.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::registry::{Registry, Subscription, SubscriptionList};
use crate::subscribers::{Extras, SubscriberRef};
use crate::topics::meta::{Topic, TopicMeta};

/// Subscription-list facade keyed by a topic type.
///
/// As cheap and disposable as [`SubscriptionList`]; holds only the derived
/// identifier, the topic descriptor, and the registry reference.
#[derive(Clone)]
pub struct TypedList<'r> {
    list: SubscriptionList<'r>,
    meta: &'static TopicMeta,
    prefix: Arc<str>,
}

impl<'r> TypedList<'r> {
    /// Creates the list for topic `T`, identifier = `T`'s fully-qualified name.
    pub fn of<T: Topic>(registry: &'r Registry) -> Self {
        Self::with_prefix::<T>(registry, "")
    }

    /// Creates the list for topic `T` with a prefixed identifier
    /// (`prefix ++ fully-qualified name`).
    pub fn with_prefix<T: Topic>(registry: &'r Registry, prefix: &str) -> Self {
        Self::from_meta(registry, T::meta(), prefix)
    }

    /// Creates the list for an instance's type; equal to [`TypedList::of`]
    /// for that type.
    pub fn for_instance<T: Topic>(registry: &'r Registry, _instance: &T) -> Self {
        Self::of::<T>(registry)
    }

    /// [`TypedList::for_instance`] with a prefixed identifier.
    pub fn for_instance_with_prefix<T: Topic>(
        registry: &'r Registry,
        _instance: &T,
        prefix: &str,
    ) -> Self {
        Self::with_prefix::<T>(registry, prefix)
    }

    pub(crate) fn from_meta(
        registry: &'r Registry,
        meta: &'static TopicMeta,
        prefix: &str,
    ) -> Self {
        let prefix: Arc<str> = Arc::from(prefix);
        let identifier = format!("{prefix}{}", meta.name);
        Self {
            list: SubscriptionList::new(registry, identifier),
            meta,
            prefix,
        }
    }

    /// The derived identifier (`prefix ++ fully-qualified type name`).
    pub fn identifier(&self) -> &str {
        self.list.identifier()
    }

    /// The topic descriptor this list is keyed by.
    pub fn meta(&self) -> &'static TopicMeta {
        self.meta
    }

    /// The registry this list reads from and writes to.
    pub fn registry(&self) -> &'r Registry {
        self.list.registry()
    }

    /// The untyped facade for the same identifier.
    pub fn as_list(&self) -> &SubscriptionList<'r> {
        &self.list
    }

    /// Records a subscription with an explicit priority; returns the handle.
    pub fn register(&self, priority: i32, subscriber: SubscriberRef) -> Subscription {
        self.list.register(priority, subscriber)
    }

    /// Records a subscription at the registry's default priority.
    pub fn subscribe(&self, subscriber: SubscriberRef) -> Subscription {
        self.list.subscribe(subscriber)
    }

    /// Snapshot of this topic's own subscriptions, in dispatch order.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.list.subscriptions()
    }

    /// Snapshot of this topic's own subscribers, in dispatch order.
    pub fn subscribers(&self) -> Vec<SubscriberRef> {
        self.list.subscribers()
    }

    /// Dispatches to this topic's own subscribers only.
    pub fn dispatch(&self, payload: &dyn Any, extras: &Extras) -> Result<(), DispatchError> {
        self.list.dispatch(payload, extras)
    }

    /// Pre-binds named dependencies into this topic's current subscribers.
    pub fn inject_dependencies(&self, dependencies: &Extras) {
        self.list.inject_dependencies(dependencies)
    }

    /// This topic and its ancestors, most specific first.
    pub fn hierarchy(&self) -> Vec<&'static TopicMeta> {
        self.meta.linearize()
    }

    /// Subscribers of this topic and all its ancestors: for each topic in
    /// hierarchy order, that topic's own subscribers in priority order.
    pub fn hierarchy_subscribers(&self) -> Vec<SubscriberRef> {
        let registry = self.registry();
        let mut out = Vec::new();
        for meta in self.meta.linearize() {
            out.extend(registry.subscribers(&self.ancestor_identifier(meta)));
        }
        out
    }

    /// Dispatches along the hierarchy: every subscriber yielded by
    /// [`TypedList::hierarchy_subscribers`], in that order, with the same
    /// payload and extras.
    ///
    /// The whole traversal is planned from a snapshot taken up front, then
    /// invoked; the first subscriber error aborts the remainder.
    pub fn dispatch_hierarchy(
        &self,
        payload: &dyn Any,
        extras: &Extras,
    ) -> Result<(), DispatchError> {
        let registry = self.registry();
        let plan: Vec<(String, Vec<Subscription>)> = self
            .meta
            .linearize()
            .into_iter()
            .map(|meta| {
                let id = self.ancestor_identifier(meta);
                let subs = registry.subscriptions(&id);
                (id, subs)
            })
            .collect();

        for (id, subs) in &plan {
            for sub in subs {
                sub.subscriber().call(payload, extras).map_err(|source| {
                    DispatchError::Subscriber {
                        topic: id.clone(),
                        subscriber: sub.subscriber().name(),
                        source,
                    }
                })?;
            }
        }
        Ok(())
    }

    fn ancestor_identifier(&self, meta: &'static TopicMeta) -> String {
        format!("{}{}", self.prefix, meta.name)
    }
}

impl PartialEq for TypedList<'_> {
    /// Equal iff derived the same identifier over the same registry.
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Eq for TypedList<'_> {}

impl fmt::Debug for TypedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedList(\"{}\")", self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::subscribers::{FnSubscriber, Value};

    struct Base;
    struct Derived;

    crate::topic!(Base);
    crate::topic!(Derived: Base);

    fn recorder(seen: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> SubscriberRef {
        let seen = Arc::clone(seen);
        FnSubscriber::arc(move |_p: &dyn Any, _e: &Extras| {
            seen.lock().push(tag);
            Ok(Box::new(()) as Value)
        })
    }

    #[test]
    fn test_identifier_is_fully_qualified_name() {
        let reg = Registry::new();
        let list = TypedList::of::<Derived>(&reg);
        assert_eq!(list.identifier(), concat!(module_path!(), "::Derived"));
    }

    #[test]
    fn test_type_and_instance_address_same_entry() {
        let reg = Registry::new();
        let by_type = TypedList::of::<Derived>(&reg);
        let by_instance = TypedList::for_instance(&reg, &Derived);

        assert_eq!(by_type, by_instance);

        let seen = Arc::new(Mutex::new(Vec::new()));
        by_type.register(0, recorder(&seen, "x"));
        assert_eq!(by_instance.subscribers().len(), 1);
    }

    #[test]
    fn test_prefix_separates_entries() {
        let reg = Registry::new();
        let plain = TypedList::of::<Base>(&reg);
        let prefixed = TypedList::with_prefix::<Base>(&reg, "audit/");

        assert_ne!(plain, prefixed);
        assert!(prefixed.identifier().starts_with("audit/"));

        let seen = Arc::new(Mutex::new(Vec::new()));
        prefixed.register(0, recorder(&seen, "x"));
        assert!(plain.subscribers().is_empty());
    }

    #[test]
    fn test_hierarchy_subscribers_subclass_before_superclass() {
        let reg = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let base = TypedList::of::<Base>(&reg);
        let derived = TypedList::of::<Derived>(&reg);

        base.register(1, recorder(&seen, "base-p1"));
        base.register(0, recorder(&seen, "base-p0"));
        derived.register(9, recorder(&seen, "derived-p9"));
        derived.register(2, recorder(&seen, "derived-p2"));

        assert_eq!(derived.hierarchy_subscribers().len(), 4);

        derived.dispatch_hierarchy(&(), &Extras::new()).unwrap();
        // derived handlers first (their priority order), then base's
        assert_eq!(
            *seen.lock(),
            vec!["derived-p2", "derived-p9", "base-p0", "base-p1"]
        );
    }

    #[test]
    fn test_plain_dispatch_skips_ancestors() {
        let reg = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        TypedList::of::<Base>(&reg).register(0, recorder(&seen, "base"));
        TypedList::of::<Derived>(&reg).register(0, recorder(&seen, "derived"));

        TypedList::of::<Derived>(&reg)
            .dispatch(&(), &Extras::new())
            .unwrap();
        assert_eq!(*seen.lock(), vec!["derived"]);
    }

    #[test]
    fn test_prefixed_instance_matches_prefixed_type() {
        let reg = Registry::new();
        assert_eq!(
            TypedList::for_instance_with_prefix(&reg, &Base, "audit/"),
            TypedList::with_prefix::<Base>(&reg, "audit/")
        );
    }

    #[test]
    fn test_hierarchy_respects_prefix() {
        let reg = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        TypedList::with_prefix::<Base>(&reg, "audit/").register(0, recorder(&seen, "audit-base"));
        TypedList::of::<Base>(&reg).register(0, recorder(&seen, "plain-base"));

        let derived = TypedList::with_prefix::<Derived>(&reg, "audit/");
        derived.dispatch_hierarchy(&(), &Extras::new()).unwrap();
        // only the prefixed ancestor entry is traversed
        assert_eq!(*seen.lock(), vec!["audit-base"]);
    }

    #[test]
    fn test_hierarchy_of_root_is_itself() {
        let reg = Registry::new();
        let base = TypedList::of::<Base>(&reg);
        let chain = base.hierarchy();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].name, Base::meta().name);
    }
}
