//! Associative lookup over dynamic values.

use tracing::trace;

use crate::shape::{deref, element_at, field_by_index, field_by_name, value_at};
use crate::value::{Selector, Value};

/// Look up a value in an associative object.
///
/// A [`Value::Foreign`] exposing [`crate::Finder`] delegates entirely; its
/// answer is authoritative and no native fallback runs. Otherwise one level
/// of dereferencing is applied and the lookup dispatches on shape:
/// sequences take an integer selector with out-of-range as a miss, maps
/// take a key of their declared kind, records take either a field position
/// or a field name.
///
/// # Panics
///
/// Panics when the container is not associative (callable or scalar
/// shapes), when a sequence is selected by name, or when a map is selected
/// by the wrong key kind.
pub fn find(container: &Value, selector: &Selector) -> Option<Value> {
    if let Value::Foreign(obj) = container {
        if let Some(finder) = obj.as_finder() {
            trace!(selector = %selector, "find: finder override");
            return finder.find(selector);
        }
    }
    let target = deref(container);
    match &target {
        Value::List(items) | Value::Tuple(items) => match selector {
            Selector::Index(i) => element_at(items, *i),
            Selector::Name(_) => {
                panic!("latebind: sequence indexed by name selector {selector}")
            }
        },
        Value::Map(map) => value_at(map, selector),
        Value::Record(rec) => match selector {
            Selector::Index(i) => field_by_index(rec, *i),
            Selector::Name(name) => field_by_name(rec, *name),
        },
        other => panic!(
            "latebind: find on non-associative value ({})",
            other.type_name()
        ),
    }
}

/// [`find`], but indifferent to whether the value was there: a miss yields
/// `Nil`.
pub fn at(container: &Value, selector: &Selector) -> Value {
    find(container, selector).unwrap_or(Value::Nil)
}
