//! Message dispatch: late-bound method calls over dynamic values.

use tracing::trace;

use crate::apply::apply;
use crate::combine::prepend_arg;
use crate::error::DynError;
use crate::shape::{deref, field_by_name};
use crate::value::{intern, KeyKind, MapKey, Value};

/// Send a message (selector followed by arguments) to a receiver.
///
/// A [`Value::Foreign`] exposing [`crate::MessageReceiver`] is handed the
/// full message verbatim and owns its entire resolution policy. For every
/// other value, the selector must be a string and is resolved as a member
/// bound to the receiver: a record field with that name, or an entry of a
/// string-keyed map. A member that exists and is callable is applied with
/// the receiver re-inserted as the first argument.
///
/// When no resolution path exists the call fails with
/// [`DynError::DoesNotUnderstand`], carrying the original receiver and the
/// full message so forwarding chains can be layered on top.
///
/// # Panics
///
/// Panics on an empty message, or a non-string selector on a receiver
/// without its own messaging semantics.
pub fn send(receiver: &Value, message: &[Value]) -> Result<Value, DynError> {
    if let Value::Foreign(obj) = receiver {
        if let Some(r) = obj.as_receiver() {
            trace!("send: receiver override");
            return r.receive(message);
        }
    }
    let Some(selector) = message.first() else {
        panic!("latebind: send requires a message selector")
    };
    let Value::Str(name) = selector else {
        panic!(
            "latebind: message selector must be a string, got {}",
            selector.type_name()
        )
    };

    let target = deref(receiver);
    let member = match &target {
        Value::Record(rec) => field_by_name(rec, intern(name)),
        Value::Map(map) if map.keys == KeyKind::Str => {
            map.entries.get(&MapKey::Str(intern(name))).cloned()
        }
        _ => None,
    };

    match member {
        Some(method) if is_callable(&method) => {
            trace!(selector = %name, "send: member method resolved");
            apply(&method, &prepend_arg(receiver.clone(), &message[1..]))
        }
        _ => {
            trace!(selector = %name, receiver = %receiver.type_name(), "send: does not understand");
            Err(DynError::does_not_understand(
                receiver.clone(),
                message.to_vec(),
            ))
        }
    }
}

fn is_callable(v: &Value) -> bool {
    match v {
        Value::Fn(_) => true,
        Value::Foreign(obj) => obj.as_applier().is_some(),
        _ => false,
    }
}
