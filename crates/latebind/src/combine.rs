//! Composition helpers: pure combinators over [`crate::apply()`] with no
//! dispatch logic of their own.

use crate::apply::apply;
use crate::value::{Ret, Value};

/// Compose callables right to left: `compose([f, g])` applied to `x` is
/// `f(g(x))`, the outermost stage listed first.
///
/// A stage returning a result tuple spreads its elements as the positional
/// arguments to the next stage; any other result passes as the single
/// argument. Composing zero stages yields the identity callable, which
/// normalizes its own arguments (none becomes `Nil`, several become a
/// tuple).
pub fn compose(stages: &[Value]) -> Value {
    let stages = stages.to_vec();
    let name = format!("compose/{}", stages.len());
    Value::native(name, move |args| {
        let mut current = args.to_vec();
        for stage in stages.iter().rev() {
            current = spread(apply(stage, &current)?);
        }
        Ok(match current.len() {
            0 => Ret::None,
            1 => Ret::One(current.pop().unwrap_or(Value::Nil)),
            _ => Ret::Many(current),
        })
    })
}

fn spread(result: Value) -> Vec<Value> {
    match result {
        Value::Tuple(items) => items.to_vec(),
        other => vec![other],
    }
}

/// Defer an application: the returned thunk captures `f` and `args` and
/// performs the call when invoked. No memoization; arguments passed to the
/// thunk itself are ignored.
pub fn bind(f: &Value, args: &[Value]) -> Value {
    let f = f.clone();
    let args = args.to_vec();
    Value::native("bind", move |_| Ok(Ret::One(apply(&f, &args)?)))
}

/// Prepend a value to an argument list in a single allocation. Message
/// dispatch uses this to re-insert the receiver as the first argument when
/// delegating a resolved method to generic application.
pub fn prepend_arg(first: Value, rest: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(rest.len() + 1);
    out.push(first);
    out.extend_from_slice(rest);
    out
}
