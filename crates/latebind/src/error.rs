use crate::value::Value;

/// Render a message (selector plus arguments) for error display.
fn fmt_message(message: &[Value]) -> String {
    let parts: Vec<String> = message.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(" "))
}

/// Recoverable failures surfaced by the dispatch primitives and by user
/// callables. Caller misuse (wrong selector kind, wrong shape at a
/// primitive) is a panic, not a `DynError`; see the `# Panics` sections on
/// the individual operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DynError {
    /// No resolution path existed for a message. Carries the original
    /// receiver and the full message so callers can pattern-match on
    /// "message not understood" and implement forwarding chains.
    #[error("{receiver} does not understand {}", fmt_message(message))]
    DoesNotUnderstand {
        receiver: Value,
        message: Vec<Value>,
    },

    #[error("call error: {0}")]
    Call(String),

    #[error("type error: expected {expected}, got {got}")]
    Type { expected: String, got: String },

    #[error("arity error: {name} expects {expected} args, got {got}")]
    Arity {
        name: String,
        expected: String,
        got: usize,
    },
}

impl DynError {
    pub fn does_not_understand(receiver: Value, message: Vec<Value>) -> Self {
        DynError::DoesNotUnderstand { receiver, message }
    }

    pub fn call(msg: impl Into<String>) -> Self {
        DynError::Call(msg.into())
    }

    pub fn type_error(expected: impl Into<String>, got: impl Into<String>) -> Self {
        DynError::Type {
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub fn arity(name: impl Into<String>, expected: impl Into<String>, got: usize) -> Self {
        DynError::Arity {
            name: name.into(),
            expected: expected.into(),
            got,
        }
    }
}
