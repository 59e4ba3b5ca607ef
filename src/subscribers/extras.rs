//! # Named-argument map passed to subscribers.
//!
//! [`Extras`] carries the named values a dispatch supplies alongside the
//! payload: caller-provided arguments and dependency-bound collaborators
//! (loggers, stores, clocks). Values are type-erased; subscribers read them
//! back with [`Extras::get`].
//!
//! ## Example
//! ```rust
//! use herald::Extras;
//!
//! let extras = Extras::new().with("attempt", 3u32).with("label", "checkout");
//!
//! assert_eq!(extras.get::<u32>("attempt"), Some(&3));
//! assert_eq!(extras.get::<&str>("label"), Some(&"checkout"));
//! assert!(extras.get::<u32>("missing").is_none());
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single type-erased named value.
pub type ArgValue = Arc<dyn Any + Send + Sync>;

/// Ordered map of named arguments delivered to subscribers.
///
/// Cheap to clone (values are `Arc`-backed). Name iteration order is the
/// names' lexicographic order, which keeps `Debug` output and overlay
/// results deterministic.
#[derive(Clone, Default)]
pub struct Extras {
    values: BTreeMap<Arc<str>, ArgValue>,
}

impl Extras {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: impl Any + Send + Sync) {
        self.values.insert(name.into(), Arc::new(value));
    }

    /// Inserts an already-shared value under `name`.
    pub fn insert_arc(&mut self, name: impl Into<Arc<str>>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style [`Extras::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<Arc<str>>, value: impl Any + Send + Sync) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value under `name` downcast to `T`, if present and of that type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name).and_then(|v| (**v).downcast_ref::<T>())
    }

    /// Returns the shared value under `name` without downcasting.
    pub fn get_arc(&self, name: &str) -> Option<ArgValue> {
        self.values.get(name).cloned()
    }

    /// Returns true if a value is present under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the entry names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_ref())
    }

    /// Returns a copy overlaid with `over`; on name clashes, `over` wins.
    #[must_use]
    pub fn overlaid(&self, over: &Extras) -> Extras {
        let mut merged = self.clone();
        for (name, value) in &over.values {
            merged.values.insert(Arc::clone(name), Arc::clone(value));
        }
        merged
    }

    /// Returns a copy containing only the entries whose names appear in `names`.
    #[must_use]
    pub fn filtered(&self, names: &[&str]) -> Extras {
        let values = self
            .values
            .iter()
            .filter(|(name, _)| names.contains(&name.as_ref()))
            .map(|(name, value)| (Arc::clone(name), Arc::clone(value)))
            .collect();
        Extras { values }
    }
}

impl fmt::Debug for Extras {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_typed_get() {
        let mut extras = Extras::new();
        extras.insert("count", 7usize);
        assert_eq!(extras.get::<usize>("count"), Some(&7));
        // wrong type reads back as absent
        assert_eq!(extras.get::<i32>("count"), None);
    }

    #[test]
    fn test_overlaid_prefers_overlay() {
        let base = Extras::new().with("a", 1i32).with("b", 2i32);
        let over = Extras::new().with("b", 20i32).with("c", 30i32);

        let merged = base.overlaid(&over);
        assert_eq!(merged.get::<i32>("a"), Some(&1));
        assert_eq!(merged.get::<i32>("b"), Some(&20));
        assert_eq!(merged.get::<i32>("c"), Some(&30));
    }

    #[test]
    fn test_filtered_keeps_only_named_entries() {
        let extras = Extras::new().with("logger", 1i32).with("clock", 2i32);
        let matched = extras.filtered(&["clock", "store"]);

        assert_eq!(matched.len(), 1);
        assert!(matched.contains("clock"));
        assert!(!matched.contains("logger"));
    }
}
