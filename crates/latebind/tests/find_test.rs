mod common;

use std::any::Any;

use latebind::{at, find, Dynamic, Finder, Selector, Value};

#[test]
fn find_on_a_sequence_by_index() {
    let l = Value::list(vec![Value::str("a"), Value::str("b"), Value::str("c")]);
    assert_eq!(find(&l, &Selector::index(1)), Some(Value::str("b")));
    assert_eq!(find(&l, &Selector::index(5)), None);
}

#[test]
fn find_on_a_map_by_key() {
    let m = Value::map_str(vec![("a", Value::int(10))]);
    assert_eq!(find(&m, &Selector::name("a")), Some(Value::int(10)));
    assert_eq!(find(&m, &Selector::name("zzz")), None);
}

#[test]
fn find_on_an_int_keyed_map() {
    let m = Value::map_int(vec![(7, Value::str("seven"))]);
    assert_eq!(find(&m, &Selector::index(7)), Some(Value::str("seven")));
    assert_eq!(find(&m, &Selector::index(8)), None);
}

#[test]
fn find_on_a_record_by_position_and_name() {
    let rec = common::example_record();
    assert_eq!(find(&rec, &Selector::index(0)), Some(Value::str("foo")));
    assert_eq!(find(&rec, &Selector::index(9)), None);
    assert_eq!(find(&rec, &Selector::name("baz")), Some(Value::str("baz")));
    assert_eq!(find(&rec, &Selector::name("nope")), None);
}

#[test]
fn find_through_a_ref() {
    let rec = Value::reference(common::example_record());
    assert_eq!(find(&rec, &Selector::name("bar")), Some(Value::str("bar")));
}

#[test]
fn at_collapses_misses_to_nil() {
    let l = Value::list(vec![Value::int(1)]);
    assert_eq!(at(&l, &Selector::index(0)), Value::int(1));
    assert_eq!(at(&l, &Selector::index(42)), Value::Nil);
}

/// A finder whose answer is authoritative: only "x" exists, and nothing
/// falls back to native lookup.
#[derive(Debug)]
struct OnlyX;

impl Finder for OnlyX {
    fn find(&self, selector: &Selector) -> Option<Value> {
        if *selector == Selector::name("x") {
            Some(Value::int(1))
        } else {
            None
        }
    }
}

impl Dynamic for OnlyX {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_finder(&self) -> Option<&dyn Finder> {
        Some(self)
    }
}

#[test]
fn finder_override_is_authoritative() {
    let v = Value::foreign(OnlyX);
    assert_eq!(find(&v, &Selector::name("x")), Some(Value::int(1)));
    assert_eq!(find(&v, &Selector::name("y")), None);
    assert_eq!(at(&v, &Selector::name("y")), Value::Nil);
}

#[test]
#[should_panic(expected = "find on non-associative value")]
fn find_on_a_scalar_is_misuse() {
    let _ = find(&Value::int(5), &Selector::index(0));
}

#[test]
#[should_panic(expected = "find on non-associative value")]
fn find_on_a_callable_is_misuse() {
    let _ = find(&common::square(), &Selector::index(0));
}

#[test]
#[should_panic(expected = "sequence indexed by name selector")]
fn name_selector_on_a_sequence_is_misuse() {
    let _ = find(&Value::list(vec![Value::int(1)]), &Selector::name("a"));
}

#[test]
#[should_panic(expected = "keys indexed by selector")]
fn wrong_key_kind_on_a_map_is_misuse() {
    let m = Value::map_str(vec![("a", Value::int(10))]);
    let _ = find(&m, &Selector::index(0));
}
