//! Generic application: one calling convention over callables, containers,
//! and user values with their own application semantics.

use tracing::trace;

use crate::error::DynError;
use crate::find::at;
use crate::shape::deref;
use crate::value::{Kind, NativeFn, Ret, Selector, Value};

/// Apply a target to a list of arguments.
///
/// A [`Value::Foreign`] exposing [`crate::Applier`] delegates entirely:
/// arguments pass through verbatim and the result comes back unchanged,
/// since the applier owns its own return convention. A sequence, map, or
/// record is lookup sugar: exactly one argument is expected and used as the
/// selector, extra arguments are ignored, and a miss yields `Nil`. A host
/// callable is invoked with absence adaptation and result normalization
/// (zero results become `Nil`, one result passes through, two or more pack
/// into a result tuple in declaration order).
///
/// # Panics
///
/// Panics when the target is neither callable, container-shaped, nor an
/// applier, or when the lookup-sugar path receives no selector argument.
pub fn apply(target: &Value, args: &[Value]) -> Result<Value, DynError> {
    if let Value::Foreign(obj) = target {
        if let Some(applier) = obj.as_applier() {
            trace!("apply: applier override");
            return applier.apply(args);
        }
    }
    let callee = deref(target);
    match &callee {
        Value::Fn(native) => call_native(native, args),
        Value::List(_) | Value::Tuple(_) | Value::Map(_) | Value::Record(_) => {
            let Some(first) = args.first() else {
                panic!("latebind: applying a container takes a selector argument")
            };
            trace!(shape = %callee.type_name(), "apply: selector lookup sugar");
            Ok(at(&callee, &Selector::from_value(first)))
        }
        Value::Foreign(obj) => match obj.as_applier() {
            Some(applier) => applier.apply(args),
            None => panic!(
                "latebind: apply on non-callable value ({})",
                obj.type_name()
            ),
        },
        other => panic!(
            "latebind: apply on non-callable value ({})",
            other.type_name()
        ),
    }
}

fn call_native(native: &NativeFn, args: &[Value]) -> Result<Value, DynError> {
    let ret = match &native.params {
        Some(kinds) => {
            let adapted = adapt_args(kinds, args);
            (native.func)(&adapted)?
        }
        None => (native.func)(args)?,
    };
    Ok(normalize(ret))
}

/// Absence adaptation against a declared parameter signature: a `Nil`
/// argument bound to a reference-like formal becomes that kind's zero or
/// empty value; bound to a scalar formal it propagates unchanged so the
/// callee's own checking fails the call.
fn adapt_args(kinds: &[Kind], args: &[Value]) -> Vec<Value> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| match (kinds.get(i), arg) {
            (Some(kind), Value::Nil) if kind.accepts_absence() => kind.empty_value(),
            _ => arg.clone(),
        })
        .collect()
}

/// Unify a callable's return into the single-value convention. `Many`
/// always carries the individual results, so the produced tuple is never
/// nested.
fn normalize(ret: Ret) -> Value {
    match ret {
        Ret::None => Value::Nil,
        Ret::One(v) => v,
        Ret::Many(vs) => Value::tuple(vs),
    }
}
