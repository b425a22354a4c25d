//! Built-in registry: one method table per value kind.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::config::AugmentConfig;
use super::types::{BuiltInFn, BuiltInObject, EvalContext};
use crate::runner::ds::error::ErrorType;
use crate::runner::ds::function_object::call_value;
use crate::runner::ds::value::Value;
use crate::runner::std_lib::{register_extensions, register_native_builtins};

/// Error type for registry operations.
#[derive(Debug, PartialEq)]
pub enum RegistryError {
    /// Object not found in registry.
    ObjectNotFound(String),
    /// Method not found on object.
    MethodNotFound(String, String),
    /// Configuration error.
    ConfigError(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::ObjectNotFound(name) => write!(f, "Object not found: {}", name),
            RegistryError::MethodNotFound(obj, method) => {
                write!(f, "Method not found: {}.{}", obj, method)
            }
            RegistryError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry for method tables.
/// Manages the table of every value kind; extensions are only ever added, never
/// swapped in over an existing entry.
pub struct BuiltInRegistry {
    /// All registered tables, keyed by kind name.
    objects: HashMap<String, BuiltInObject>,

    /// Every `Kind.method` installed through [`define_method`](Self::define_method).
    installed: Vec<String>,

    /// Every `Kind.method` that [`define_method`](Self::define_method) left alone.
    skipped: Vec<String>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: HashMap::new(),
            installed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Create a registry holding only what a host already provides.
    pub fn with_native() -> Self {
        let mut registry = Self::new();
        register_native_builtins(&mut registry);
        registry
    }

    /// Create a registry holding only the extensions of the default revision.
    pub fn with_extensions() -> Self {
        Self::with_extensions_for(&AugmentConfig::default())
    }

    /// Create a registry holding only the extensions `config` selects.
    pub fn with_extensions_for(config: &AugmentConfig) -> Self {
        let mut registry = Self::new();
        register_extensions(&mut registry, config.revision);
        registry
    }

    /// Create a registry with the host built-ins plus the extensions.
    /// Host built-ins are registered first, so they always win.
    pub fn with_core() -> Self {
        Self::with_core_for(&AugmentConfig::default())
    }

    pub fn with_core_for(config: &AugmentConfig) -> Self {
        let mut registry = Self::with_native();
        register_extensions(&mut registry, config.revision);
        registry
    }

    /// Register a method table (programmatic API).
    pub fn register_object(&mut self, obj: BuiltInObject) {
        self.objects.insert(obj.name.clone(), obj);
    }

    /// Get a registered table by name.
    pub fn get_object(&self, name: &str) -> Option<&BuiltInObject> {
        self.objects.get(name)
    }

    /// Get a mutable reference to a registered table.
    pub fn get_object_mut(&mut self, name: &str) -> Option<&mut BuiltInObject> {
        self.objects.get_mut(name)
    }

    /// Install `func` as `object.method` unless that name is already taken.
    ///
    /// Never overwrites and never fails: a taken name makes the call a no-op. A
    /// name is taken when `object` can already reach it, on its own table or on
    /// a parent table.
    /// A table that does not exist yet is created with `Object` as its parent
    /// (`Object` itself is the root).
    /// Returns whether the method was installed.
    pub fn define_method(&mut self, object: &str, method: &str, func: BuiltInFn) -> bool {
        let key = format!("{}.{}", object, method);
        self.objects
            .entry(object.to_string())
            .or_insert_with(|| BuiltInObject::for_kind(object));

        let taken = self.find_method(object, method).is_some();
        let installed = !taken
            && self
                .objects
                .get_mut(object)
                .map_or(false, |table| table.define_method(method, func));

        if installed {
            trace!(method = %key, "installed extension");
            self.installed.push(key);
        } else {
            debug!(method = %key, "name already reachable, extension not installed");
            self.skipped.push(key);
        }
        installed
    }

    /// `Kind.method` names installed through [`define_method`](Self::define_method), in order.
    pub fn installed(&self) -> &[String] {
        &self.installed
    }

    /// `Kind.method` names [`define_method`](Self::define_method) declined to overwrite.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Get a method defined directly on `object`'s table.
    pub fn get_method(&self, object: &str, method: &str) -> Option<&BuiltInFn> {
        self.objects
            .get(object)
            .and_then(|obj| obj.methods.get(method))
    }

    /// Like [`find_method`](Self::find_method), but says what was missing.
    pub fn require_method(&self, object: &str, method: &str) -> Result<&BuiltInFn, RegistryError> {
        if !self.has_object(object) {
            return Err(RegistryError::ObjectNotFound(object.to_string()));
        }
        self.find_method(object, method)
            .ok_or_else(|| RegistryError::MethodNotFound(object.to_string(), method.to_string()))
    }

    /// Look `method` up on `object`'s table, then along its parent tables.
    pub fn find_method(&self, object: &str, method: &str) -> Option<&BuiltInFn> {
        let mut next = Some(object);
        // The table graph is user-editable; bound the walk.
        let mut hops = 0;
        while let Some(name) = next {
            let table = self.objects.get(name)?;
            if let Some(func) = table.methods.get(method) {
                return Some(func);
            }
            hops += 1;
            if hops > self.objects.len() {
                return None;
            }
            next = table.prototype.as_deref();
        }
        None
    }

    /// Check if a table exists in the registry.
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Check if a method exists directly on a table.
    pub fn has_method(&self, object: &str, method: &str) -> bool {
        self.objects
            .get(object)
            .map(|obj| obj.methods.contains_key(method))
            .unwrap_or(false)
    }

    /// Invoke `method` on `this` the way the host would: a callable property on the
    /// receiver (own or inherited) wins, then the kind's table and its parents.
    pub fn call_method(
        &self,
        ctx: &mut EvalContext,
        this: Value,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, ErrorType> {
        let kind = match kind_of(&this) {
            Some(kind) => kind,
            None => {
                return Err(ErrorType::TypeError(format!(
                    "Cannot read property '{}' of {}",
                    method, this
                )))
            }
        };

        if let Value::Object(o) = &this {
            let own = o.borrow().get(method);
            if let Some(callee) = own.filter(Value::is_callable) {
                trace!(kind, method, "dispatching to object property");
                return call_value(&callee, ctx, this, args);
            }
        }

        match self.find_method(kind, method) {
            Some(func) => {
                trace!(kind, method, "dispatching to method table");
                func.call(ctx, this, args)
            }
            None => Err(ErrorType::TypeError(format!(
                "{}.{} is not a function",
                kind, method
            ))),
        }
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the method table that serves values like `v`.
/// `null` and `undefined` have none.
pub fn kind_of(v: &Value) -> Option<&'static str> {
    match v {
        Value::Undefined | Value::Null => None,
        Value::Boolean(_) => Some("Boolean"),
        Value::Number(_) => Some("Number"),
        Value::String(_) => Some("String"),
        Value::Object(_) => Some("Object"),
        Value::Array(_) => Some("Array"),
        Value::Function(_) => Some("Function"),
    }
}
