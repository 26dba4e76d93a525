use crate::diagnostics::CallError;
use crate::registry::{Callable, OwnerDef, TargetRegistry};
use crate::value::{Value, ValueKind};

use super::shape_error;

pub const OWNER: &str = "demo.Arrays";

pub fn register_arrays(registry: &mut TargetRegistry) {
    registry.register(
        OwnerDef::new(OWNER)
            .method("reverse", &[ValueKind::List], Callable::Static(reverse))
            .method("sorted", &[ValueKind::List], Callable::Static(sorted))
            .method("range", &[ValueKind::Int], Callable::Static(range)),
    );
}

fn reverse(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::List(items)] => Ok(Value::List(items.iter().rev().cloned().collect())),
        _ => Err(shape_error("reverse", args)),
    }
}

/// Sorts a list of Ints or a list of Strings.
fn sorted(args: &[Value]) -> Result<Value, CallError> {
    let [Value::List(items)] = args else {
        return Err(shape_error("sorted", args));
    };
    if let Some(mut ints) = items.iter().map(Value::as_int).collect::<Option<Vec<_>>>() {
        ints.sort_unstable();
        return Ok(Value::from(ints));
    }
    if let Some(mut strings) = items.iter().map(Value::as_str).collect::<Option<Vec<_>>>() {
        strings.sort_unstable();
        return Ok(Value::from(strings));
    }
    Err(CallError::new(
        "sorted needs a list of only Ints or only Strings",
    ))
}

fn range(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::Int(n)] if *n < 0 => Err(CallError::new(format!("range({}) is negative", n))),
        [Value::Int(n)] => Ok(Value::List((0..*n).map(Value::Int).collect())),
        _ => Err(shape_error("range", args)),
    }
}
