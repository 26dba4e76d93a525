//! # Built-in owners
//!
//! Owners registered by default so suites can name a target without writing any
//! Rust. Each domain module exposes one `register_*` function.
//!
//! - **`arith`**: `demo.Arith` (`square`, `add`, `divide`)
//! - **`arrays`**: `demo.Arrays` (`reverse`, `sorted`, `range`)
//! - **`text`**: `demo.Text` (`upper`, `concat`, `length`)
//! - **`accumulator`**: `demo.Accumulator`, an instance owner with running state

use crate::diagnostics::CallError;
use crate::registry::TargetRegistry;
use crate::value::Value;

pub mod accumulator;
pub mod arith;
pub mod arrays;
pub mod text;

/// Builds a registry holding every built-in owner.
pub fn build_default_registry() -> TargetRegistry {
    let mut registry = TargetRegistry::new();
    register_all_owners(&mut registry);
    registry
}

pub fn register_all_owners(registry: &mut TargetRegistry) {
    arith::register_arith(registry);
    arrays::register_arrays(registry);
    text::register_text(registry);
    accumulator::register_accumulator(registry);
}

// Signatures are checked during resolution, so a shape error here means a
// later case slipped past the derived-kind check.
pub(crate) fn shape_error(method: &str, args: &[Value]) -> CallError {
    let kinds: Vec<&str> = args.iter().map(Value::type_name).collect();
    CallError::new(format!("{} cannot take ({})", method, kinds.join(", ")))
}
