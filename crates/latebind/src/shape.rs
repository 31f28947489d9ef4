//! The value introspector: shape classification and low-level element and
//! field access. Everything here is selector-level plumbing; the dispatch
//! policy lives in the `find`, `apply`, and `send` modules.

use crate::value::{KeyKind, MapKey, MapValue, Record, Selector, Value};

/// The coarse shape of a value as seen by the dispatch primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Callable,
    Sequence,
    Keyed,
    Record,
    Scalar,
}

/// Unwrap a reference wrapper exactly one level. Identity on every other
/// kind. A ref directly inside a ref is not chased further, so access
/// through it ends up a misuse panic downstream.
pub fn deref(v: &Value) -> Value {
    match v {
        Value::Ref(cell) => cell.borrow().clone(),
        other => other.clone(),
    }
}

/// Classify a value after one level of dereferencing.
///
/// `Foreign` classifies as `Scalar`: its capabilities are probed by each
/// primitive before classification ever happens, so by the time shape
/// matters a foreign value has no special standing.
pub fn classify(v: &Value) -> Shape {
    match deref(v) {
        Value::Fn(_) => Shape::Callable,
        Value::List(_) | Value::Tuple(_) => Shape::Sequence,
        Value::Map(_) => Shape::Keyed,
        Value::Record(_) => Shape::Record,
        _ => Shape::Scalar,
    }
}

/// Field access by position. Out of range is a miss, not a failure.
pub fn field_by_index(record: &Record, index: i64) -> Option<Value> {
    if index < 0 {
        return None;
    }
    record.fields.get(index as usize).map(|(_, v)| v.clone())
}

/// Field access by name. A missing field is a miss, not a failure.
pub fn field_by_name(record: &Record, name: lasso::Spur) -> Option<Value> {
    record
        .fields
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.clone())
}

/// Element access on a sequence. Out of range is a miss, not a failure.
pub fn element_at(items: &[Value], index: i64) -> Option<Value> {
    if index < 0 {
        return None;
    }
    items.get(index as usize).cloned()
}

/// Key lookup on a map. An absent key is a miss.
///
/// # Panics
///
/// Panics when the selector kind does not match the map's declared key
/// kind; a mistyped key is caller misuse, not a miss.
pub fn value_at(map: &MapValue, selector: &Selector) -> Option<Value> {
    let key = match (map.keys, selector) {
        (KeyKind::Int, Selector::Index(i)) => MapKey::Int(*i),
        (KeyKind::Str, Selector::Name(s)) => MapKey::Str(*s),
        (declared, _) => panic!(
            "latebind: map with {declared:?} keys indexed by selector {selector}"
        ),
    };
    map.entries.get(&key).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::intern;

    #[test]
    fn classification_covers_all_shapes() {
        assert_eq!(classify(&Value::native("f", |_| Ok(crate::value::Ret::None))), Shape::Callable);
        assert_eq!(classify(&Value::list(vec![])), Shape::Sequence);
        assert_eq!(classify(&Value::tuple(vec![])), Shape::Sequence);
        assert_eq!(classify(&Value::map_str(vec![])), Shape::Keyed);
        assert_eq!(classify(&Value::record("r", vec![])), Shape::Record);
        assert_eq!(classify(&Value::int(1)), Shape::Scalar);
        assert_eq!(classify(&Value::Nil), Shape::Scalar);
    }

    #[test]
    fn ref_derefs_one_level_only() {
        let inner = Value::list(vec![Value::int(1)]);
        let single = Value::reference(inner.clone());
        assert_eq!(classify(&single), Shape::Sequence);

        let double = Value::reference(Value::reference(inner));
        assert_eq!(classify(&double), Shape::Scalar);
    }

    #[test]
    fn sequence_bounds_are_misses() {
        let items = vec![Value::int(10), Value::int(20)];
        assert_eq!(element_at(&items, 1), Some(Value::int(20)));
        assert_eq!(element_at(&items, 5), None);
        assert_eq!(element_at(&items, -1), None);
    }

    #[test]
    fn record_access_by_index_and_name() {
        let rec = match Value::record("pair", vec![("a", Value::int(1)), ("b", Value::int(2))]) {
            Value::Record(r) => r,
            _ => unreachable!(),
        };
        assert_eq!(field_by_index(&rec, 0), Some(Value::int(1)));
        assert_eq!(field_by_index(&rec, 9), None);
        assert_eq!(field_by_name(&rec, intern("b")), Some(Value::int(2)));
        assert_eq!(field_by_name(&rec, intern("zzz")), None);
    }

    #[test]
    #[should_panic(expected = "keys indexed by selector")]
    fn mistyped_map_key_is_misuse() {
        let map = MapValue::from_str_entries(vec![("a", Value::int(1))]);
        value_at(&map, &Selector::index(0));
    }
}
