//! Host built-ins.
//!
//! A small slice of what a modern host already ships on its prototypes. Loading
//! these before the extensions shows the installer leaving existing names alone:
//! `String.trim` and `Array.forEach` here shadow the extension versions.

use crate::runner::ds::array_object::{array_get, array_length};
use crate::runner::ds::error::ErrorType;
use crate::runner::ds::function_object::call_value;
use crate::runner::ds::operations::type_conversion::{to_property_key, to_string, type_of};
use crate::runner::ds::value::Value;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInFn, EvalContext};

use super::string::trim;

/// Register the host built-ins with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let natives: Vec<(&str, &str, BuiltInFn)> = vec![
        ("Object", "hasOwnProperty", BuiltInFn::Native(object_has_own_property)),
        ("Object", "toString", BuiltInFn::Native(object_to_string)),
        ("Function", "call", BuiltInFn::Native(function_call)),
        ("String", "concat", BuiltInFn::Native(string_concat)),
        ("String", "trim", BuiltInFn::Native(string_trim)),
        ("Array", "push", BuiltInFn::Native(array_push)),
        ("Array", "forEach", BuiltInFn::Native(array_for_each)),
    ];
    for (kind, name, func) in natives {
        if let Some(table) = registry.get_object_mut(kind) {
            table.methods.insert(name.to_string(), func);
        }
    }
}

/// Object.prototype.hasOwnProperty
fn object_has_own_property(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let key = to_property_key(args.first().unwrap_or(&Value::Undefined));
    Ok(Value::Boolean(match &this {
        Value::Object(o) => o.borrow().has_own_property(&key),
        _ => false,
    }))
}

/// Object.prototype.toString
fn object_to_string(
    _ctx: &mut EvalContext,
    this: Value,
    _args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let tag = match &this {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        Value::Boolean(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Function(_) => "Function",
        Value::Object(_) => "Object",
    };
    Ok(Value::String(format!("[object {}]", tag)))
}

/// Function.prototype.call
fn function_call(
    ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let mut args = args.into_iter();
    let this_arg = args.next().unwrap_or(Value::Undefined);
    call_value(&this, ctx, this_arg, args.collect())
}

/// String.prototype.concat
fn string_concat(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let mut s = to_string(&this);
    for arg in &args {
        s.push_str(&to_string(arg));
    }
    Ok(Value::String(s))
}

/// String.prototype.trim
fn string_trim(
    _ctx: &mut EvalContext,
    this: Value,
    _args: Vec<Value>,
) -> Result<Value, ErrorType> {
    Ok(Value::from(trim(&to_string(&this))))
}

/// Array.prototype.push
fn array_push(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    match &this {
        Value::Array(a) => {
            let mut a = a.borrow_mut();
            a.extend(args);
            Ok(Value::integer(a.len() as i64))
        }
        other => Err(ErrorType::TypeError(format!(
            "Array.push called on {}",
            type_of(other)
        ))),
    }
}

/// Array.prototype.forEach
///
/// Host semantics: the callback gets `(item, index, array)` and the call returns
/// `undefined`.
fn array_for_each(
    ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let array = match &this {
        Value::Array(a) => a,
        other => {
            return Err(ErrorType::TypeError(format!(
                "Array.forEach called on {}",
                type_of(other)
            )))
        }
    };
    let callback = args.first().cloned().unwrap_or(Value::Undefined);
    let this_arg = args.get(1).cloned().unwrap_or(Value::Undefined);

    let len = array_length(array);
    for idx in 0..len {
        let item = array_get(array, idx);
        call_value(
            &callback,
            ctx,
            this_arg.clone(),
            vec![item, Value::integer(idx as i64), this.clone()],
        )?;
    }
    Ok(Value::Undefined)
}
