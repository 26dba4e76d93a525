use crate::diagnostics::CallError;
use crate::registry::{Callable, OwnerDef, TargetRegistry};
use crate::value::{Value, ValueKind};

use super::shape_error;

pub const OWNER: &str = "demo.Text";

pub fn register_text(registry: &mut TargetRegistry) {
    use ValueKind::String;
    registry.register(
        OwnerDef::new(OWNER)
            .method("upper", &[String], Callable::Static(upper))
            .method("concat", &[String, String], Callable::Static(concat))
            .method("length", &[String], Callable::Static(length)),
    );
}

fn upper(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::String(s)] => Ok(Value::String(s.to_uppercase())),
        _ => Err(shape_error("upper", args)),
    }
}

fn concat(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::String(a), Value::String(b)] => Ok(Value::String(format!("{}{}", a, b))),
        _ => Err(shape_error("concat", args)),
    }
}

/// Length in characters, not bytes.
fn length(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::String(s)] => Ok(Value::Int(s.chars().count() as i64)),
        _ => Err(shape_error("length", args)),
    }
}
