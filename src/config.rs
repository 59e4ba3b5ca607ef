//! # Registry configuration.
//!
//! Provides [`RegistryConfig`] centralized settings for a [`Registry`](crate::Registry).
//!
//! Config is used in two ways:
//! 1. **Registry creation**: `Registry::with_config(config)`
//! 2. **Registration defaults**: the facades' priority-less `subscribe`
//!    variants fall back to [`RegistryConfig::default_priority`].

/// Configuration for a dispatch registry.
///
/// ## Field semantics
/// - `default_priority`: priority recorded by `subscribe` variants that take
///   no explicit priority (lower runs earlier)
/// - `list_capacity`: initial capacity reserved when an identifier's
///   subscription list is first created
///
/// ## Notes
/// All fields are public for flexibility; construct via struct update from
/// `RegistryConfig::default()`.
#[derive(Clone, Copy, Debug)]
pub struct RegistryConfig {
    /// Priority used when a registration does not specify one.
    ///
    /// Subscriptions are ordered by priority ascending; equal priorities
    /// keep their registration order.
    pub default_priority: i32,

    /// Initial capacity of a newly created subscription list.
    ///
    /// Purely a pre-allocation hint; lists grow past it freely.
    pub list_capacity: usize,
}

impl Default for RegistryConfig {
    /// Returns a config with `default_priority = 0` and `list_capacity = 4`.
    fn default() -> Self {
        Self {
            default_priority: 0,
            list_capacity: 4,
        }
    }
}
