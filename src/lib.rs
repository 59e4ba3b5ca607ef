//! # herald
//!
//! **Herald** is a lightweight in-process event/command dispatch library for Rust.
//!
//! Producers raise typed events or commands; independently registered
//! handlers consume them without either side knowing about the other. The
//! crate is a synchronous, single-process call-dispatch mechanism, not a
//! broker: no networking, no persistence, no retries, no scheduling.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Event E    │   │  Command C   │   │ raw caller   │
//!     │  .notify()   │   │  .execute()  │   │ .dispatch()  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  TypedList / SubscriptionList (stateless facades)                 │
//! │  - identifier = prefix ++ fully-qualified type name (typed)       │
//! │  - hierarchy traversal via TopicMeta::linearize (typed)           │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry (single source of truth)                                │
//! │  - identifier -> ordered Vec<Subscription>                        │
//! │  - priority ascending, stable ties, after every mutation          │
//! │  - inject_dependencies: wholesale rewrite to bound subscribers    │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼ (snapshot, invoke outside the lock)
//!                  Subscribe::call(payload, extras)
//!                  first Err aborts the rest (fail-fast)
//! ```
//!
//! ### Dispatch lifecycle
//! ```text
//! register(id, priority, subscriber)      repeatable
//!   └─► append + stable re-sort
//! inject_dependencies(id, {name: value})  optional, after registrations
//!   └─► swap each matching subscriber for a bound variant
//! dispatch / notify / execute             repeatable
//!   ├─► snapshot the list
//!   ├─► call each subscriber in order, same payload + extras
//!   └─► Err from a subscriber ─► propagate, skip the rest
//! ```
//!
//! ## Features
//! | Area             | Description                                               | Key types / traits                  |
//! |------------------|-----------------------------------------------------------|-------------------------------------|
//! | **Registry**     | Priority-ordered subscriber lists keyed by identifier.    | [`Registry`], [`SubscriptionList`]  |
//! | **Topics**       | Identifiers derived from types; hierarchy linearization.  | [`Topic`], [`TopicMeta`], [`TypedList`] |
//! | **Binding**      | Pre-bind named collaborators into subscribers.            | [`Extras`], [`Subscribe::params`]   |
//! | **Events**       | Multicast notify, zero-or-more handlers.                  | [`Event`]                           |
//! | **Commands**     | Exactly one handler, returns its reply.                   | [`Command`]                         |
//! | **Errors**       | Typed errors for registration and dispatch.               | [`SubscribeError`], [`DispatchError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Concurrency
//! The engine is synchronous: handlers run to completion in the caller's
//! stack, in order, with no suspension points. A [`Registry`] may be shared
//! by reference (its interior is lock-protected, and dispatch invokes
//! handlers outside the lock on a snapshot), but cross-operation atomicity -
//! such as registering and binding as one step - is the caller's discipline.
//!
//! ## Example
//! ```rust
//! use herald::{topic, Command, Event, Extras, Registry};
//!
//! // An event: any number of handlers, multicast.
//! struct ProductSold { items: u32 }
//! topic!(ProductSold);
//! impl Event for ProductSold {}
//!
//! // A command: exactly one handler, returns a reply.
//! struct Echo { text: String }
//! topic!(Echo);
//! impl Command for Echo { type Reply = String; }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Registry::new();
//!
//!     ProductSold::subscribe(&registry, 0, |event: &ProductSold, _: &Extras| {
//!         println!("{} product(s) sold", event.items);
//!         Ok(())
//!     });
//!     ProductSold { items: 2 }.notify(&registry)?;
//!
//!     Echo::subscribe(&registry, |cmd: &Echo, _: &Extras| Ok(cmd.text.clone()))?;
//!     assert_eq!(Echo { text: "hello".into() }.execute(&registry)?, "hello");
//!     Ok(())
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod registry;
mod subscribers;
mod topics;

// ---- Public re-exports ----

pub use config::RegistryConfig;
pub use dispatch::{Command, Event, PayloadTypeError};
pub use error::{DispatchError, SubscribeError};
pub use registry::{Registry, Subscription, SubscriptionList};
pub use subscribers::{ArgValue, Extras, FnSubscriber, Subscribe, SubscriberError, SubscriberRef, Value};
pub use topics::{Topic, TopicMeta, TypedList};

// Optional: expose a simple built-in logging subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
