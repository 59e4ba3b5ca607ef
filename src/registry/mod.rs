//! # Registry: subscription storage, facades, and dependency binding.
//!
//! The registry is the single source of truth: it owns every
//! [`Subscription`] and keeps each identifier's sequence sorted by priority
//! ascending with stable ties after every mutation.
//!
//! ## Contents
//! - [`Registry`] identifier → ordered subscription list, dispatch engine
//! - [`Subscription`] one `(identifier, priority, subscriber)` record
//! - [`SubscriptionList`] stateless per-identifier facade
//! - `binder` the bound-subscriber wrapper behind
//!   [`Registry::inject_dependencies`]
//!
//! ## Quick reference
//! - **Writers**: `register`, `register_sole`, `inject_dependencies`.
//! - **Readers**: `subscriptions`, `subscribers`, `count`, `identifiers`.
//! - **Dispatch**: `dispatch` (snapshot, in-order, fail-fast).

pub(crate) mod binder;
mod list;
#[allow(clippy::module_inception)]
mod registry;
mod subscription;

pub use list::SubscriptionList;
pub use registry::Registry;
pub use subscription::Subscription;
