use crate::diagnostics::CallError;
use crate::registry::{Callable, OwnerDef, TargetRegistry};
use crate::value::{Value, ValueKind};

use super::shape_error;

pub const OWNER: &str = "demo.Arith";

pub fn register_arith(registry: &mut TargetRegistry) {
    use ValueKind::{Float, Int};
    registry.register(
        OwnerDef::new(OWNER)
            .method("square", &[Int], Callable::Static(square))
            .method("square", &[Float], Callable::Static(square))
            .method("add", &[Int, Int], Callable::Static(add))
            .method("add", &[Float, Float], Callable::Static(add))
            .method("divide", &[Int, Int], Callable::Static(divide)),
    );
}

fn square(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::Int(n)] => n
            .checked_mul(*n)
            .map(Value::Int)
            .ok_or_else(|| CallError::new(format!("square({}) overflows", n))),
        [Value::Float(n)] => Ok(Value::Float(n * n)),
        _ => Err(shape_error("square", args)),
    }
}

fn add(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::Int(a), Value::Int(b)] => a
            .checked_add(*b)
            .map(Value::Int)
            .ok_or_else(|| CallError::new(format!("add({}, {}) overflows", a, b))),
        [Value::Float(a), Value::Float(b)] => Ok(Value::Float(a + b)),
        _ => Err(shape_error("add", args)),
    }
}

fn divide(args: &[Value]) -> Result<Value, CallError> {
    match args {
        [Value::Int(_), Value::Int(0)] => Err(CallError::new("division by zero")),
        [Value::Int(a), Value::Int(b)] => a
            .checked_div(*b)
            .map(Value::Int)
            .ok_or_else(|| CallError::new(format!("divide({}, {}) overflows", a, b))),
        _ => Err(shape_error("divide", args)),
    }
}
