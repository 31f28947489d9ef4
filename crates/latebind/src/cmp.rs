//! Generic equality and ordering with per-value override hooks.

use std::cmp::Ordering;

use crate::capability::Equaler;
use crate::value::{Record, Value};

fn equaler_of(v: &Value) -> Option<&dyn Equaler> {
    match v {
        Value::Foreign(obj) => obj.as_equaler(),
        _ => None,
    }
}

/// Generic equality. The left operand's [`Equaler`] wins; failing that the
/// right operand's (symmetry is the override's responsibility, not the
/// core's); failing both, native structural equality over the built-in
/// kinds.
///
/// # Panics
///
/// Panics when the native fallback reaches an operand whose kind has no
/// native equality (lists, tuples, maps, callables, foreign values without
/// an `Equaler`). Use [`equal_non_comparable`] to get `false` instead.
pub fn equal(a: &Value, b: &Value) -> bool {
    if let Some(eq) = equaler_of(a) {
        return eq.equal(b);
    }
    if let Some(eq) = equaler_of(b) {
        return eq.equal(a);
    }
    native_equal(a, b)
}

/// [`equal`], except that operands of kinds incapable of native equality
/// compare `false` instead of failing. An `Equaler` on either side still
/// takes precedence and bypasses the comparability check entirely.
pub fn equal_non_comparable(a: &Value, b: &Value) -> bool {
    if let Some(eq) = equaler_of(a) {
        return eq.equal(b);
    }
    if let Some(eq) = equaler_of(b) {
        return eq.equal(a);
    }
    if !a.kind().comparable() || !b.kind().comparable() {
        return false;
    }
    native_equal(a, b)
}

fn assert_comparable(v: &Value) {
    if !v.kind().comparable() {
        panic!(
            "latebind: {} values do not support native equality",
            v.type_name()
        );
    }
}

/// Structural equality over the comparable kinds. Records compare
/// field-wise, recursing, so a record carrying a non-comparable field
/// panics inside the recursion.
fn native_equal(a: &Value, b: &Value) -> bool {
    assert_comparable(a);
    assert_comparable(b);
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Ref(x), Value::Ref(y)) => std::rc::Rc::ptr_eq(x, y),
        (Value::Record(x), Value::Record(y)) => record_equal(x, y),
        _ => false,
    }
}

fn record_equal(a: &Record, b: &Record) -> bool {
    if a.type_tag != b.type_tag || a.fields.len() != b.fields.len() {
        return false;
    }
    a.fields
        .iter()
        .zip(b.fields.iter())
        .all(|((na, va), (nb, vb))| na == nb && native_equal(va, vb))
}

/// Three-way ordering.
///
/// The left operand's [`crate::Comparer`] wins outright and fully
/// determines the sign; there is no symmetric fallback to the right
/// operand. Identical values compare equal. `Nil` orders strictly below
/// any present value. Ints, floats, and strings order natively against
/// their own kind.
///
/// # Panics
///
/// Panics for every other pairing: mixed kinds, and kinds with no native
/// ordering and no `Comparer` on the left operand.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    if let Value::Foreign(obj) = a {
        if let Some(cmp) = obj.as_comparer() {
            return cmp.compare(b);
        }
    }
    if a.identical(b) {
        return Ordering::Equal;
    }
    match (a, b) {
        (Value::Nil, _) => Ordering::Less,
        (_, Value::Nil) => Ordering::Greater,
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Str(x), Value::Str(y)) => x.as_str().cmp(y.as_str()),
        _ => panic!(
            "latebind: no ordering between {} and {}",
            a.type_name(),
            b.type_name()
        ),
    }
}
