use std::fmt;
use std::rc::Rc;

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::operations::type_conversion::type_of;
use crate::runner::ds::value::Value;
use crate::runner::plugin::types::{EvalContext, NativeFn};

pub type FunctionRef = Rc<FunctionObject>;

pub type ClosureFn = dyn Fn(&mut EvalContext, Value, Vec<Value>) -> Result<Value, ErrorType>;

pub enum FunctionBody {
    Native(NativeFn),
    Closure(Box<ClosureFn>),
    /// Partial application: `stored_args` are prepended to every call of `target`.
    Curried {
        target: FunctionRef,
        stored_args: Rc<Vec<Value>>,
    },
}

pub struct FunctionObject {
    name: String,
    body: FunctionBody,
}
impl FunctionObject {
    pub fn native(name: impl Into<String>, func: NativeFn) -> FunctionRef {
        Rc::new(FunctionObject {
            name: name.into(),
            body: FunctionBody::Native(func),
        })
    }

    pub fn closure<F>(name: impl Into<String>, func: F) -> FunctionRef
    where
        F: Fn(&mut EvalContext, Value, Vec<Value>) -> Result<Value, ErrorType> + 'static,
    {
        Rc::new(FunctionObject {
            name: name.into(),
            body: FunctionBody::Closure(Box::new(func)),
        })
    }

    pub fn curried(target: &FunctionRef, stored_args: Vec<Value>) -> FunctionRef {
        Rc::new(FunctionObject {
            name: format!("curried {}", target.name),
            body: FunctionBody::Curried {
                target: Rc::clone(target),
                stored_args: Rc::new(stored_args),
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The captured prefix when this function came out of `curry`.
    pub fn stored_args(&self) -> Option<&[Value]> {
        match &self.body {
            FunctionBody::Curried { stored_args, .. } => Some(stored_args.as_slice()),
            _ => None,
        }
    }

    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: Value,
        args: Vec<Value>,
    ) -> Result<Value, ErrorType> {
        match &self.body {
            FunctionBody::Native(f) => f(ctx, this, args),
            FunctionBody::Closure(f) => f(ctx, this, args),
            FunctionBody::Curried {
                target,
                stored_args,
            } => {
                let mut full_args = Vec::with_capacity(stored_args.len() + args.len());
                full_args.extend(stored_args.iter().cloned());
                full_args.extend(args);
                target.call(ctx, Value::Null, full_args)
            }
        }
    }
}

impl fmt::Debug for FunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionObject({})", self.name)
    }
}

/// Calls `callee` if it is a function, otherwise raises a type error.
pub fn call_value(
    callee: &Value,
    ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    match callee {
        Value::Function(f) => f.call(ctx, this, args),
        other => Err(ErrorType::TypeError(format!(
            "{} ({}) is not a function",
            other,
            type_of(other)
        ))),
    }
}
