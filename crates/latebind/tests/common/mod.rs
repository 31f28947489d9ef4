#![allow(dead_code)]

use std::any::Any;

use latebind::{apply, Applier, Dynamic, DynError, Ret, Value};

/// f(x) = x * x
pub fn square() -> Value {
    Value::native("square", |args| {
        let x = args[0]
            .as_int()
            .ok_or_else(|| DynError::type_error("int", args[0].type_name()))?;
        Ok(Ret::One(Value::int(x * x)))
    })
}

/// f(x) = -x
pub fn negate() -> Value {
    Value::native("negate", |args| {
        let x = args[0]
            .as_int()
            .ok_or_else(|| DynError::type_error("int", args[0].type_name()))?;
        Ok(Ret::One(Value::int(-x)))
    })
}

/// f(x) = (x, x), a two-value return.
pub fn double() -> Value {
    Value::native("double", |args| {
        Ok(Ret::Many(vec![args[0].clone(), args[0].clone()]))
    })
}

/// f(x, y) = x == y over ints.
pub fn take_two_eq() -> Value {
    Value::native("take-two-eq", |args| {
        if args.len() != 2 {
            return Err(DynError::arity("take-two-eq", "2", args.len()));
        }
        Ok(Ret::One(Value::bool(args[0].as_int() == args[1].as_int())))
    })
}

/// An applier that wraps another callable and annotates its result,
/// exercising the "applier owns its own return convention" rule.
#[derive(Debug)]
pub struct Annotate {
    pub name: &'static str,
    pub func: Value,
}

impl Applier for Annotate {
    fn apply(&self, args: &[Value]) -> Result<Value, DynError> {
        let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let out = apply(&self.func, args)?;
        Ok(Value::str(&format!(
            "{}({})->{}",
            self.name,
            rendered.join(" "),
            out
        )))
    }
}

impl Dynamic for Annotate {
    fn type_name(&self) -> &'static str {
        "annotate"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_applier(&self) -> Option<&dyn Applier> {
        Some(self)
    }
}

/// A three-field record used across the lookup tests.
pub fn example_record() -> Value {
    Value::record(
        "example",
        vec![
            ("foo", Value::str("foo")),
            ("bar", Value::str("bar")),
            ("baz", Value::str("baz")),
        ],
    )
}
