//! # Subscribers: the calling contract and its adapters.
//!
//! This module defines what a subscriber *is*: the [`Subscribe`] trait (one
//! explicit signature - payload plus named [`Extras`]), the closure adapter
//! [`FnSubscriber`], and the shared handle alias [`SubscriberRef`] stored in
//! the registry.
//!
//! ## Architecture
//! ```text
//! Dispatch flow:
//!   caller ── dispatch(payload, extras) ──► Registry
//!                                              │  (snapshot, in priority order)
//!                                              ├──► Subscribe::call(payload, extras)
//!                                              │         │
//!                                              │    ┌────┴─────────┬──────────┐
//!                                              │    ▼              ▼          ▼
//!                                              │  FnSubscriber  LogWriter  custom impls
//!                                              │
//!                                              └── first Err aborts the rest (fail-fast)
//! ```
//!
//! ## Rules
//! - Exactly one calling contract: `call(&dyn Any, &Extras) -> Result<Value, _>`.
//! - Subscribers declare bindable parameter names via [`Subscribe::params`];
//!   the dependency binder never inspects the callable itself.
//! - Errors propagate to the dispatch caller unmodified; nothing is caught,
//!   logged, or retried by the engine.

mod extras;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use extras::{ArgValue, Extras};
pub use subscriber::{FnSubscriber, Subscribe, SubscriberError, SubscriberRef, Value};

#[cfg(feature = "logging")]
pub use log::LogWriter;
