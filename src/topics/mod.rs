//! # Topics: identifiers derived from types and their hierarchies.
//!
//! This module groups the type-keyed layer over the registry:
//!
//! ## Contents
//! - [`TopicMeta`], [`Topic`], [`topic!`](crate::topic) static descriptors
//!   with explicit base edges and deterministic linearization
//! - [`TypedList`] subscription-list facade keyed by a topic's
//!   fully-qualified name (optionally prefixed), with hierarchy-aware
//!   queries and dispatch
//!
//! ## Quick reference
//! - Identifier derivation: `prefix ++ fully_qualified_type_name`.
//! - Linearization: depth-first over declared bases, duplicates eliminated,
//!   most specific first.
//! - Hierarchy dispatch: subclass handlers before superclass handlers;
//!   within one topic, priority order.

mod meta;
mod typed;

pub use meta::{Topic, TopicMeta};
pub use typed::TypedList;
