//! Late binding helpers for dynamic values.
//!
//! `latebind` provides a small set of generic operations — function
//! application ([`apply()`]), associative lookup ([`find()`]/[`at`]),
//! message dispatch ([`send()`]), equality and ordering ([`equal`],
//! [`compare`]) —
//! that work uniformly across native container and callable values and
//! user-defined values that opt into custom behavior through the
//! capability interfaces ([`Applier`], [`Finder`], [`MessageReceiver`],
//! [`Equaler`], [`Comparer`]). Capability checks take priority over every
//! native-kind fallback, so late bound language extensions can be built on
//! top without touching the core.
//!
//! Expected absence surfaces as `Option`/`Nil`; caller misuse (wrong
//! selector kind, wrong shape at a primitive) panics; an unresolvable
//! message fails with the inspectable
//! [`DynError::DoesNotUnderstand`](crate::DynError::DoesNotUnderstand).

pub mod apply;
pub mod capability;
pub mod cmp;
pub mod combine;
pub mod error;
pub mod find;
pub mod send;
pub mod shape;
pub mod value;

pub use apply::apply;
pub use capability::{Applier, Comparer, Dynamic, Equaler, Finder, MessageReceiver};
pub use cmp::{compare, equal, equal_non_comparable};
pub use combine::{bind, compose, prepend_arg};
pub use error::DynError;
pub use find::{at, find};
pub use send::send;
pub use shape::{classify, deref, Shape};
pub use value::{
    intern, resolve, with_resolved, KeyKind, Kind, MapKey, MapValue, NativeFn, Record, Ret,
    Selector, Value,
};
