//! Name-based method lookup.
//!
//! Rust has no runtime reflection, so methods that should be reachable by
//! `(owner, method)` name are registered here up front. [`TargetRegistry::resolve`]
//! is the only operation the invoker needs: it picks the overload whose declared
//! parameter kinds match the kinds derived from the first case and binds it to a
//! freshly constructed instance when the method needs one.
//!
//! ## Usage
//! ```rust
//! use casecheck::registry::{Callable, OwnerDef, TargetRegistry};
//! use casecheck::value::{Value, ValueKind};
//! use casecheck::CallError;
//!
//! fn double(args: &[Value]) -> Result<Value, CallError> {
//!     match args {
//!         [Value::Int(n)] => Ok(Value::Int(n * 2)),
//!         _ => Err(CallError::new("double expects one Int")),
//!     }
//! }
//!
//! let mut registry = TargetRegistry::new();
//! registry.register(OwnerDef::new("util.Math").method("double", &[ValueKind::Int], Callable::Static(double)));
//! let mut target = registry.resolve("util.Math", "double", &[ValueKind::Int]).unwrap();
//! assert_eq!(target.call(&[Value::Int(4)]), Ok(Value::Int(8)));
//! ```

use std::fmt;

use im::OrdMap;

use crate::diagnostics::{CallError, HarnessError};
use crate::value::{Value, ValueKind};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Static methods: operate only on their arguments.
pub type StaticFn = fn(args: &[Value]) -> Result<Value, CallError>;

/// Instance methods: also receive the state of the instance they are bound to.
pub type InstanceFn = fn(receiver: &mut Value, args: &[Value]) -> Result<Value, CallError>;

/// Builds the initial state of a fresh owner instance.
pub type ConstructorFn = fn() -> Value;

/// The two calling conventions a registered method may use.
#[derive(Clone, Copy)]
pub enum Callable {
    Static(StaticFn),
    Instance(InstanceFn),
}

/// One overload of a named method.
#[derive(Clone)]
pub struct MethodDef {
    pub params: Vec<ValueKind>,
    pub callable: Callable,
}

impl MethodDef {
    /// Returns true if arguments of the given kinds may be passed to this overload.
    pub fn accepts(&self, kinds: &[ValueKind]) -> bool {
        params_accept(&self.params, kinds)
    }
}

/// A named owner: an optional constructor and its method overloads.
#[derive(Clone)]
pub struct OwnerDef {
    pub name: String,
    pub constructor: Option<ConstructorFn>,
    pub methods: OrdMap<String, Vec<MethodDef>>,
}

impl OwnerDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            constructor: None,
            methods: OrdMap::new(),
        }
    }

    pub fn constructor(mut self, constructor: ConstructorFn) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Adds an overload. Overloads of one name are tried in registration order.
    pub fn method(mut self, name: &str, params: &[ValueKind], callable: Callable) -> Self {
        self.methods
            .entry(name.to_string())
            .or_insert_with(Vec::new)
            .push(MethodDef {
                params: params.to_vec(),
                callable,
            });
        self
    }
}

/// A resolved method, bound to its receiver when it is an instance method.
pub struct Target {
    pub owner: String,
    pub method: String,
    pub params: Vec<ValueKind>,
    callable: Callable,
    receiver: Option<Value>,
}

impl Target {
    pub fn call(&mut self, args: &[Value]) -> Result<Value, CallError> {
        match (self.callable, self.receiver.as_mut()) {
            (Callable::Static(f), _) => f(args),
            (Callable::Instance(f), Some(receiver)) => f(receiver, args),
            (Callable::Instance(_), None) => Err(CallError::new(format!(
                "{}::{} is an instance method but no instance was constructed",
                self.owner, self.method
            ))),
        }
    }

    pub fn accepts(&self, kinds: &[ValueKind]) -> bool {
        params_accept(&self.params, kinds)
    }

    pub fn signature(&self) -> String {
        format!("{}({})", self.method, join_kinds(&self.params))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("owner", &self.owner)
            .field("method", &self.signature())
            .field("bound", &self.receiver.is_some())
            .finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Registry of owners, inspectable at runtime.
#[derive(Default, Clone)]
pub struct TargetRegistry {
    pub owners: OrdMap<String, OwnerDef>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an owner, merging its overloads into an existing owner of the same name.
    pub fn register(&mut self, owner: OwnerDef) {
        match self.owners.get_mut(&owner.name) {
            Some(existing) => {
                if owner.constructor.is_some() {
                    existing.constructor = owner.constructor;
                }
                for (name, overloads) in owner.methods {
                    existing.methods.entry(name).or_insert_with(Vec::new).extend(overloads);
                }
            }
            None => {
                self.owners.insert(owner.name.clone(), owner);
            }
        }
    }

    pub fn get(&self, owner: &str) -> Option<&OwnerDef> {
        self.owners.get(owner)
    }

    pub fn has(&self, owner: &str) -> bool {
        self.owners.contains_key(owner)
    }

    pub fn list(&self) -> Vec<String> {
        self.owners.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Signatures of every overload, as `owner::method(Kind, ...)`, in name order.
    pub fn signatures(&self) -> Vec<String> {
        self.owners
            .values()
            .flat_map(|owner| {
                owner.methods.iter().flat_map(move |(name, overloads)| {
                    overloads.iter().map(move |m| {
                        let kind = match m.callable {
                            Callable::Static(_) => "static",
                            Callable::Instance(_) => "instance",
                        };
                        format!("{}::{}({}) [{}]", owner.name, name, join_kinds(&m.params), kind)
                    })
                })
            })
            .collect()
    }

    /// Resolves `owner::method` against the argument kinds of a suite's first case.
    ///
    /// # Errors
    /// Returns [`HarnessError::Resolution`] if the owner or method is unknown, if no
    /// overload accepts `kinds`, or if an instance method's owner has no constructor.
    pub fn resolve(
        &self,
        owner: &str,
        method: &str,
        kinds: &[ValueKind],
    ) -> Result<Target, HarnessError> {
        let Some(owner_def) = self.owners.get(owner) else {
            return Err(HarnessError::resolution(
                owner,
                method,
                "unknown owner",
                Some(format!("registered owners: {}", self.list().join(", "))),
            ));
        };
        let Some(overloads) = owner_def.methods.get(method) else {
            let names: Vec<&str> = owner_def.methods.keys().map(String::as_str).collect();
            return Err(HarnessError::resolution(
                owner,
                method,
                "unknown method",
                Some(format!("{} declares: {}", owner, names.join(", "))),
            ));
        };
        let Some(def) = overloads.iter().find(|m| m.accepts(kinds)) else {
            let available: Vec<String> = overloads
                .iter()
                .map(|m| format!("{}({})", method, join_kinds(&m.params)))
                .collect();
            return Err(HarnessError::resolution(
                owner,
                method,
                format!("no overload accepts ({})", join_kinds(kinds)),
                Some(format!("available overloads: {}", available.join(", "))),
            ));
        };

        let receiver = match def.callable {
            Callable::Static(_) => None,
            Callable::Instance(_) => match owner_def.constructor {
                Some(construct) => Some(construct()),
                None => {
                    return Err(HarnessError::resolution(
                        owner,
                        method,
                        "instance method on an owner without a constructor",
                        None,
                    ))
                }
            },
        };

        tracing::info!(owner, method, params = %join_kinds(&def.params), "resolved target");
        Ok(Target {
            owner: owner.to_string(),
            method: method.to_string(),
            params: def.params.clone(),
            callable: def.callable,
            receiver,
        })
    }
}

fn params_accept(params: &[ValueKind], kinds: &[ValueKind]) -> bool {
    params.len() == kinds.len()
        && params
            .iter()
            .zip(kinds)
            .all(|(declared, actual)| declared.accepts(*actual))
}

pub fn join_kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ValueKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    fn echo(args: &[Value]) -> Result<Value, CallError> {
        Ok(Value::List(args.to_vec()))
    }

    fn count(receiver: &mut Value, _args: &[Value]) -> Result<Value, CallError> {
        let next = receiver.as_int().unwrap_or(0) + 1;
        *receiver = Value::Int(next);
        Ok(Value::Int(next))
    }

    fn registry() -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        registry.register(
            OwnerDef::new("t.Echo")
                .method("echo", &[ValueKind::Int], Callable::Static(echo))
                .method("echo", &[ValueKind::Any, ValueKind::Any], Callable::Static(echo)),
        );
        registry.register(
            OwnerDef::new("t.Counter")
                .constructor(|| Value::Int(0))
                .method("tick", &[ValueKind::Nil], Callable::Instance(count)),
        );
        registry.register(OwnerDef::new("t.Broken").method(
            "tick",
            &[ValueKind::Nil],
            Callable::Instance(count),
        ));
        registry
    }

    #[test]
    fn unknown_owner_names_identifiers() {
        let err = registry()
            .resolve("t.Missing", "echo", &[ValueKind::Int])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Resolution);
        assert!(err.to_string().contains("t.Missing::echo"));
    }

    #[test]
    fn unknown_method_is_resolution_error() {
        let err = registry()
            .resolve("t.Echo", "shout", &[ValueKind::Int])
            .unwrap_err();
        assert!(err.to_string().contains("unknown method"));
    }

    #[test]
    fn overload_selected_by_kinds() {
        let registry = registry();
        let target = registry
            .resolve("t.Echo", "echo", &[ValueKind::String, ValueKind::Int])
            .unwrap();
        assert_eq!(target.signature(), "echo(Any, Any)");
        let err = registry
            .resolve("t.Echo", "echo", &[ValueKind::Float])
            .unwrap_err();
        assert!(err.to_string().contains("no overload accepts (Float)"));
    }

    #[test]
    fn each_resolution_binds_a_fresh_instance() {
        let registry = registry();
        let mut first = registry.resolve("t.Counter", "tick", &[ValueKind::Nil]).unwrap();
        assert_eq!(first.call(&[Value::Nil]), Ok(Value::Int(1)));
        assert_eq!(first.call(&[Value::Nil]), Ok(Value::Int(2)));
        let mut second = registry.resolve("t.Counter", "tick", &[ValueKind::Nil]).unwrap();
        assert_eq!(second.call(&[Value::Nil]), Ok(Value::Int(1)));
    }

    #[test]
    fn instance_method_needs_constructor() {
        let err = registry()
            .resolve("t.Broken", "tick", &[ValueKind::Nil])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Resolution);
    }

    #[test]
    fn register_merges_overloads() {
        let mut registry = registry();
        registry.register(OwnerDef::new("t.Echo").method(
            "echo",
            &[ValueKind::Float],
            Callable::Static(echo),
        ));
        assert_eq!(registry.get("t.Echo").unwrap().methods["echo"].len(), 3);
        assert!(registry.resolve("t.Echo", "echo", &[ValueKind::Float]).is_ok());
    }
}
