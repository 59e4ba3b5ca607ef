//! # Topic descriptors and hierarchy linearization.
//!
//! A [`TopicMeta`] is a static description of a dispatchable type: its
//! fully-qualified name and its direct base topics. Base edges are declared
//! explicitly (normally via the [`topic!`](crate::topic) macro) - there is
//! no runtime hierarchy introspection.
//!
//! ## Linearization
//! [`TopicMeta::linearize`] walks the declared edges depth-first, keeping
//! the most specific occurrence of each ancestor:
//!
//! ```text
//!       A                linearize(D) = [D, B, C, A]
//!      / \
//!     B   C              the shared base A sorts after every
//!      \ /               topic that derives it
//!       D
//! ```
//!
//! The order is deterministic (declaration order of bases, left to right)
//! and recomputed fresh on every call.

use std::fmt;
use std::ptr;

/// Static descriptor of a dispatchable type.
///
/// `name` is the fully-qualified type name (the [`topic!`](crate::topic)
/// macro derives it from the declaring module's path); `bases` are accessors
/// for the direct base topics, most significant first.
pub struct TopicMeta {
    /// Fully-qualified type name; the identifier is derived from it.
    pub name: &'static str,
    /// Direct base topics, in declaration order.
    pub bases: &'static [fn() -> &'static TopicMeta],
}

impl TopicMeta {
    /// Returns this topic and all its ancestors, most specific first.
    ///
    /// Depth-first over the declared base edges with duplicate elimination;
    /// a base shared by several branches (diamond) appears once, after every
    /// topic that derives it. Cyclic declarations are tolerated by skipping
    /// the back edge.
    pub fn linearize(&'static self) -> Vec<&'static TopicMeta> {
        let mut trail: Vec<&'static TopicMeta> = Vec::new();
        let mut path: Vec<*const TopicMeta> = Vec::new();
        visit(self, &mut path, &mut trail);

        let mut out = Vec::with_capacity(trail.len());
        for (i, meta) in trail.iter().enumerate() {
            if trail[i + 1..].iter().any(|m| ptr::eq(*m, *meta)) {
                continue;
            }
            out.push(*meta);
        }
        out
    }
}

fn visit(
    meta: &'static TopicMeta,
    path: &mut Vec<*const TopicMeta>,
    trail: &mut Vec<&'static TopicMeta>,
) {
    let addr = meta as *const TopicMeta;
    if path.contains(&addr) {
        return;
    }
    path.push(addr);
    trail.push(meta);
    for base in meta.bases {
        visit(base(), path, trail);
    }
    path.pop();
}

impl fmt::Debug for TopicMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bases: Vec<&str> = self.bases.iter().map(|b| b().name).collect();
        f.debug_struct("TopicMeta")
            .field("name", &self.name)
            .field("bases", &bases)
            .finish()
    }
}

/// A type that dispatch identifiers can be derived from.
///
/// Implemented with the [`topic!`](crate::topic) macro, which records the
/// fully-qualified name and the explicit base edges:
///
/// ```rust
/// use herald::{topic, Topic};
///
/// struct OrderPlaced;
/// struct PriorityOrderPlaced;
///
/// topic!(OrderPlaced);
/// topic!(PriorityOrderPlaced: OrderPlaced);
///
/// let chain = PriorityOrderPlaced::meta().linearize();
/// assert_eq!(chain.len(), 2);
/// assert!(chain[0].name.ends_with("PriorityOrderPlaced"));
/// assert!(chain[1].name.ends_with("OrderPlaced"));
/// ```
pub trait Topic: std::any::Any {
    /// Returns the static descriptor for this type.
    fn meta() -> &'static TopicMeta
    where
        Self: Sized;
}

/// Declares a type as a [`Topic`], with optional base topics.
///
/// The topic name is the expansion site's module path plus the type name,
/// i.e. the type's fully-qualified name when invoked next to the type's
/// definition.
///
/// ```rust
/// use herald::topic;
///
/// struct Base;
/// struct Left;
/// struct Right;
/// struct Bottom;
///
/// topic!(Base);
/// topic!(Left: Base);
/// topic!(Right: Base);
/// topic!(Bottom: Left, Right);
/// ```
#[macro_export]
macro_rules! topic {
    ($ty:ty) => {
        $crate::topic!($ty:);
    };
    ($ty:ty : $($base:ty),* $(,)?) => {
        impl $crate::Topic for $ty {
            fn meta() -> &'static $crate::TopicMeta {
                static META: $crate::TopicMeta = $crate::TopicMeta {
                    name: ::core::concat!(
                        ::core::module_path!(),
                        "::",
                        ::core::stringify!($ty)
                    ),
                    bases: &[$(<$base as $crate::Topic>::meta),*],
                };
                &META
            }
        }
    };
}

#[cfg(test)]
mod tests {
    struct A;
    struct B;
    struct C;
    struct D;

    crate::topic!(A);
    crate::topic!(B: A);
    crate::topic!(C: A);
    crate::topic!(D: B, C);

    use super::*;

    fn names(metas: &[&'static TopicMeta]) -> Vec<&'static str> {
        metas
            .iter()
            .map(|m| m.name.rsplit("::").next().unwrap_or(m.name))
            .collect()
    }

    #[test]
    fn test_name_is_fully_qualified() {
        assert_eq!(A::meta().name, concat!(module_path!(), "::A"));
    }

    #[test]
    fn test_linear_chain_most_specific_first() {
        assert_eq!(names(&B::meta().linearize()), vec!["B", "A"]);
        assert_eq!(names(&A::meta().linearize()), vec!["A"]);
    }

    #[test]
    fn test_diamond_deduplicates_shared_base() {
        assert_eq!(names(&D::meta().linearize()), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_linearization_is_deterministic() {
        assert_eq!(names(&D::meta().linearize()), names(&D::meta().linearize()));
    }
}
