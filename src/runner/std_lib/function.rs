//! Function extensions.
//!
//! Provides `Function.prototype.curry`.

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::function_object::{FunctionObject, FunctionRef};
use crate::runner::ds::operations::type_conversion::type_of;
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::Revision;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

use super::core::install;

/// Install the Function extensions. Both revisions carry the same set.
pub fn register(registry: &mut BuiltInRegistry, _revision: Revision) {
    install(registry, "Function", "curry", function_curry);
}

/// Pre-bind `stored_args` to `target`.
///
/// Calling the result with `more` calls `target` with `stored_args ++ more`. The
/// stored prefix is shared, never mutated, so the result can be called any number
/// of times with different trailing arguments.
pub fn curry(target: &FunctionRef, stored_args: Vec<Value>) -> FunctionRef {
    FunctionObject::curried(target, stored_args)
}

/// Function.prototype.curry
fn function_curry(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    match &this {
        Value::Function(f) => Ok(Value::Function(curry(f, args))),
        other => Err(ErrorType::TypeError(format!(
            "Function.curry called on {} ({})",
            other,
            type_of(other)
        ))),
    }
}
