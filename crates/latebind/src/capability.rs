//! Capability interfaces: the override hooks a user value may implement to
//! participate in dispatch with custom behavior.
//!
//! A value opts in by implementing [`Dynamic`] and entering the dynamic
//! world as [`Value::Foreign`]. Each primitive checks the relevant
//! capability before any native-kind fallback; this is the only extension
//! mechanism.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use crate::error::DynError;
use crate::value::{Selector, Value};

/// Knows how to apply arguments to itself and return a value.
pub trait Applier {
    fn apply(&self, args: &[Value]) -> Result<Value, DynError>;
}

/// Can index itself and report whether a value was at that index.
pub trait Finder {
    fn find(&self, selector: &Selector) -> Option<Value>;
}

/// Implements its own messaging semantics. The receiver owns its entire
/// resolution policy; the core guarantees only the single delegation call.
pub trait MessageReceiver {
    fn receive(&self, message: &[Value]) -> Result<Value, DynError>;
}

/// Overrides equality against an arbitrary other value. Symmetry is the
/// implementor's responsibility.
pub trait Equaler {
    fn equal(&self, other: &Value) -> bool;
}

/// Overrides ordering against an arbitrary other value. The override fully
/// determines the sign; there is no symmetric fallback to the right operand.
pub trait Comparer {
    fn compare(&self, other: &Value) -> Ordering;
}

/// The umbrella trait behind [`Value::Foreign`]. Implementors override the
/// `as_*` hooks for the capabilities they support; the defaults opt out of
/// everything.
pub trait Dynamic: fmt::Debug {
    fn type_name(&self) -> &'static str {
        "foreign"
    }

    /// Downcasting support, so overrides can recognize their own type on
    /// the other side of a comparison.
    fn as_any(&self) -> &dyn Any;

    fn as_applier(&self) -> Option<&dyn Applier> {
        None
    }

    fn as_finder(&self) -> Option<&dyn Finder> {
        None
    }

    fn as_receiver(&self) -> Option<&dyn MessageReceiver> {
        None
    }

    fn as_equaler(&self) -> Option<&dyn Equaler> {
        None
    }

    fn as_comparer(&self) -> Option<&dyn Comparer> {
        None
    }
}
