//! Core types for the method tables.

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::AugmentConfig;
use std::collections::HashMap;

/// Name of the table every other table ultimately inherits from.
pub const ROOT_OBJECT: &str = "Object";

/// Execution context passed to every method.
/// Carries the configuration that steers the policy-dependent extensions.
pub struct EvalContext {
    pub config: AugmentConfig,
}

impl EvalContext {
    pub fn new() -> Self {
        EvalContext {
            config: AugmentConfig::default(),
        }
    }

    pub fn with_config(config: AugmentConfig) -> Self {
        EvalContext { config }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn =
    fn(ctx: &mut EvalContext, this: Value, args: Vec<Value>) -> Result<Value, ErrorType>;

/// Built-in function - either compiled-in or supplied at runtime as a closure.
pub enum BuiltInFn {
    /// Direct function pointer - zero overhead for compiled-in functions.
    Native(NativeFn),

    /// Caller-provided closure - small vtable indirection cost.
    Dynamic(Box<dyn Fn(&mut EvalContext, Value, Vec<Value>) -> Result<Value, ErrorType>>),
}

impl std::fmt::Debug for BuiltInFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuiltInFn::Native(func) => f.debug_tuple("Native").field(func).finish(),
            BuiltInFn::Dynamic(_) => f.debug_tuple("Dynamic").field(&"<closure>").finish(),
        }
    }
}

impl BuiltInFn {
    /// Execute this built-in function.
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: Value,
        args: Vec<Value>,
    ) -> Result<Value, ErrorType> {
        match self {
            BuiltInFn::Native(f) => f(ctx, this, args),
            BuiltInFn::Dynamic(f) => f(ctx, this, args),
        }
    }
}

/// Method table for one value kind (e.g. `String`, `Array`, `Object`).
pub struct BuiltInObject {
    /// Name of the kind (e.g., "Array", "Object").
    pub name: String,

    /// Parent table consulted when a method is missing here ("Object" for most kinds).
    pub prototype: Option<String>,

    /// Methods callable on values of this kind.
    pub methods: HashMap<String, BuiltInFn>,
}

impl BuiltInObject {
    /// Create a new method table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        BuiltInObject {
            name: name.into(),
            prototype: Some(ROOT_OBJECT.to_string()),
            methods: HashMap::new(),
        }
    }

    /// Create a table for `name`, parented to `Object` unless it is `Object` itself.
    pub fn for_kind(name: &str) -> Self {
        let table = BuiltInObject::new(name);
        if name == ROOT_OBJECT {
            table.with_no_prototype()
        } else {
            table
        }
    }

    /// Set the prototype chain parent.
    pub fn with_prototype(mut self, prototype: impl Into<String>) -> Self {
        self.prototype = Some(prototype.into());
        self
    }

    /// Set no prototype (for the root `Object` table).
    pub fn with_no_prototype(mut self) -> Self {
        self.prototype = None;
        self
    }

    /// Install `func` under `name` only if nothing is defined there yet.
    /// Returns whether it was installed.
    pub fn define_method(&mut self, name: &str, func: BuiltInFn) -> bool {
        if self.methods.contains_key(name) {
            return false;
        }
        self.methods.insert(name.to_string(), func);
        true
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Method names in sorted order.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
