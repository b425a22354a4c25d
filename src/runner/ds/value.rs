use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::array_object::{new_array, ArrayRef};
use crate::runner::ds::function_object::FunctionRef;
use crate::runner::ds::object::{Object, ObjectRef};
use crate::runner::ds::operations::type_conversion::{TYPE_STR_NULL, TYPE_STR_UNDEFINED};

/// Nesting depth after which `Display` stops descending into objects and arrays.
const MAX_DISPLAY_DEPTH: usize = 12;

pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    String(String),
    Number(NumberType),
    Object(ObjectRef),
    Array(ArrayRef),
    Function(FunctionRef),
}
impl Value {
    pub fn new_object(object: Object) -> Self {
        Value::Object(object.into_ref())
    }

    pub fn new_array(items: Vec<Value>) -> Self {
        Value::Array(new_array(items))
    }

    pub fn integer(i: i64) -> Self {
        Value::Number(NumberType::Integer(i))
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    fn write_nested(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Value::Object(o) => {
                let o = o.borrow();
                let keys = o.own_keys();
                if keys.is_empty() {
                    return write!(f, "{{}}");
                }
                if depth >= MAX_DISPLAY_DEPTH {
                    return write!(f, "[Object]");
                }
                write!(f, "{{ ")?;
                for (idx, key) in keys.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write_key(f, key)?;
                    write!(f, ": ")?;
                    match o.get_own(key) {
                        Some(v) => v.write_nested(f, depth + 1)?,
                        None => write!(f, "{}", TYPE_STR_UNDEFINED)?,
                    }
                }
                write!(f, " }}")
            }
            Value::Array(a) => {
                let a = a.borrow();
                if depth >= MAX_DISPLAY_DEPTH && !a.is_empty() {
                    return write!(f, "[Array]");
                }
                write!(f, "[")?;
                for (idx, item) in a.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    item.write_nested(f, depth + 1)?;
                }
                write!(f, "]")
            }
            _ => write!(f, "{}", self),
        }
    }
}
impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Undefined => Value::Undefined,
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::String(s) => Value::String(s.to_string()),
            Value::Number(n) => Value::Number(n.clone()),
            Value::Object(o) => Value::Object(Rc::clone(o)),
            Value::Array(a) => Value::Array(Rc::clone(a)),
            Value::Function(func) => Value::Function(Rc::clone(func)),
        }
    }
}
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "{}", TYPE_STR_UNDEFINED),
            Value::Null => write!(f, "{}", TYPE_STR_NULL),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Function(func) => write!(f, "[Function: {}]", func.name()),
            Value::Object(_) | Value::Array(_) => self.write_nested(f, 0),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Value::Undefined"),
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Number(n) => write!(f, "Value::Number({:?})", n),
            Value::Object(_) => write!(f, "Value::Object({})", self),
            Value::Array(_) => write!(f, "Value::Array({})", self),
            Value::Function(func) => write!(f, "Value::Function({})", func.name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(NumberType::Integer(i))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(NumberType::Float(n))
    }
}

fn write_key(f: &mut Formatter<'_>, key: &str) -> fmt::Result {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if is_identifier {
        write!(f, "{}", key)
    } else {
        write!(f, "{:?}", key)
    }
}

#[derive(Debug)]
pub enum NumberType {
    Integer(i64),
    Float(f64),
}
impl NumberType {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumberType::Integer(i) => *i as f64,
            NumberType::Float(nf) => *nf,
        }
    }
}
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Integer(i) => write!(f, "{}", i),
            NumberType::Float(nf) => {
                if nf.is_nan() {
                    write!(f, "NaN")
                } else if nf.is_infinite() {
                    write!(f, "{}", if *nf > 0.0 { "Infinity" } else { "-Infinity" })
                } else if *nf == 0.0 {
                    // Covers -0 as well.
                    write!(f, "0")
                } else if nf.abs() >= 1e21 || nf.abs() < 1e-6 {
                    // Host exponent form: 1e+21, 1.5e-7
                    let exp = format!("{:e}", nf);
                    match exp.split_once('e') {
                        Some((mantissa, power)) if !power.starts_with('-') => {
                            write!(f, "{}e+{}", mantissa, power)
                        }
                        _ => write!(f, "{}", exp),
                    }
                } else {
                    write!(f, "{}", nf)
                }
            }
        }
    }
}
impl Clone for NumberType {
    fn clone(&self) -> Self {
        match self {
            NumberType::Integer(i) => NumberType::Integer(*i),
            NumberType::Float(nf) => NumberType::Float(*nf),
        }
    }
}
impl PartialEq for NumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberType::Integer(a), NumberType::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}
