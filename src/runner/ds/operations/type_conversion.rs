use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::value::{NumberType, Value};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn type_of(a: &Value) -> &'static str {
    match a {
        Value::Undefined => TYPE_STR_UNDEFINED,
        // The host says "object" here.
        Value::Null => TYPE_STR_NULL,
        Value::Boolean(_) => TYPE_STR_BOOLEAN,
        Value::String(_) => TYPE_STR_STRING,
        Value::Number(_) => TYPE_STR_NUMBER,
        Value::Object(_) => TYPE_STR_OBJECT,
        Value::Array(_) => TYPE_STR_OBJECT,
        Value::Function(_) => TYPE_STR_FUNCTION,
    }
}

/// Host falsiness: `undefined`, `null`, `false`, `0`, `NaN` and `""`.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Undefined | Value::Null => false,
        Value::Boolean(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(NumberType::Integer(i)) => *i != 0,
        Value::Number(NumberType::Float(f)) => !(f.is_nan() || *f == 0.0),
        Value::Object(_) | Value::Array(_) | Value::Function(_) => true,
    }
}

/// String conversion as done by `String(v)`.
pub fn to_string(v: &Value) -> String {
    match v {
        Value::Undefined => TYPE_STR_UNDEFINED.to_string(),
        Value::Null => TYPE_STR_NULL.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) => array_to_string(v, &mut Vec::new()),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Function(f) => format!("function {}() {{ [native code] }}", f.name()),
    }
}

/// Joins array elements with ",". An array already being joined further up
/// (one that contains itself) contributes "".
fn array_to_string(v: &Value, in_progress: &mut Vec<*const RefCell<Vec<Value>>>) -> String {
    let array = match v {
        Value::Array(a) => a,
        Value::Undefined | Value::Null => return String::new(),
        other => return to_string(other),
    };
    let ptr = Rc::as_ptr(array);
    if in_progress.contains(&ptr) {
        return String::new();
    }
    in_progress.push(ptr);
    let joined = array
        .borrow()
        .iter()
        .map(|item| array_to_string(item, in_progress))
        .collect::<Vec<_>>()
        .join(",");
    in_progress.pop();
    joined
}

/// Like [`to_string`], except `null` and `undefined` render as the empty string
/// (the rule array joining uses).
pub fn to_string_or_empty(v: &Value) -> String {
    match v {
        Value::Undefined | Value::Null => String::new(),
        _ => to_string(v),
    }
}

pub fn to_property_key(v: &Value) -> String {
    to_string(v)
}
