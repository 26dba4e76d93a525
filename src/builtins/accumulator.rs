//! `demo.Accumulator`: an instance owner whose state is a running Int total.
//!
//! Every run binds a fresh instance, so totals never leak between runs.

use crate::diagnostics::CallError;
use crate::registry::{Callable, OwnerDef, TargetRegistry};
use crate::value::{Value, ValueKind};

use super::shape_error;

pub const OWNER: &str = "demo.Accumulator";

pub fn register_accumulator(registry: &mut TargetRegistry) {
    registry.register(
        OwnerDef::new(OWNER)
            .constructor(|| Value::Int(0))
            .method("push", &[ValueKind::Int], Callable::Instance(push)),
    );
}

fn push(total: &mut Value, args: &[Value]) -> Result<Value, CallError> {
    let [Value::Int(n)] = args else {
        return Err(shape_error("push", args));
    };
    let current = total.as_int().unwrap_or(0);
    let next = current
        .checked_add(*n)
        .ok_or_else(|| CallError::new("accumulator overflow"))?;
    *total = Value::Int(next);
    Ok(Value::Int(next))
}
