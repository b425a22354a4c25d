//! Array extensions.
//!
//! Provides the iteration shim: `forEach` in the legacy revision, `each` in the
//! current one.

use crate::runner::ds::array_object::{array_get, array_length, ArrayRef};
use crate::runner::ds::error::ErrorType;
use crate::runner::ds::function_object::call_value;
use crate::runner::ds::operations::type_conversion::{is_truthy, type_of};
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::Revision;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

use super::core::install;

/// Install the Array extensions of `revision`.
pub fn register(registry: &mut BuiltInRegistry, revision: Revision) {
    match revision {
        Revision::Current => install(registry, "Array", "each", array_each),
        Revision::Legacy => install(registry, "Array", "forEach", array_each),
    };
}

/// Call `f` once per element, in index order.
///
/// The length is read once up front; an element gone by the time it is visited
/// reads as `undefined`. Stops at the first error.
pub fn each<F>(items: &ArrayRef, mut f: F) -> Result<(), ErrorType>
where
    F: FnMut(Value) -> Result<(), ErrorType>,
{
    let len = array_length(items);
    for idx in 0..len {
        // No borrow is held while `f` runs, so it may mutate the array.
        f(array_get(items, idx))?;
    }
    Ok(())
}

/// Array.prototype.each / Array.prototype.forEach (shim)
///
/// Calls `fn(item)` with `this` bound to the context argument (or `null`), ignores
/// the results and hands back the receiver for chaining.
fn array_each(ctx: &mut EvalContext, this: Value, args: Vec<Value>) -> Result<Value, ErrorType> {
    let items = match &this {
        Value::Array(items) => items,
        other => {
            return Err(ErrorType::TypeError(format!(
                "Array.each called on {}",
                type_of(other)
            )))
        }
    };
    let callback = match args.first() {
        Some(f) if f.is_callable() => f,
        other => {
            return Err(ErrorType::TypeError(format!(
                "Array.each: {} is not a function",
                other.unwrap_or(&Value::Undefined)
            )))
        }
    };
    let context = match args.get(1) {
        Some(c) if is_truthy(c) => c.clone(),
        _ => Value::Null,
    };

    each(items, |item| {
        call_value(callback, ctx, context.clone(), vec![item]).map(|_| ())
    })?;
    Ok(this)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::array_object::new_array;

    #[test]
    fn test_each_visits_in_order() {
        let items = new_array(vec![Value::integer(1), Value::integer(2), Value::integer(3)]);
        let mut seen = vec![];
        each(&items, |v| {
            seen.push(v);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![Value::integer(1), Value::integer(2), Value::integer(3)]);
    }

    #[test]
    fn test_each_reads_length_once() {
        let items = new_array(vec![Value::integer(1), Value::integer(2)]);
        let mut seen = vec![];
        each(&items, |v| {
            // Growing the array does not extend the walk; shrinking it yields undefined.
            let mut a = items.borrow_mut();
            a.push(Value::integer(9));
            a.remove(0);
            a.remove(0);
            seen.push(v);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![Value::integer(1), Value::Undefined]);
    }

    #[test]
    fn test_each_stops_at_first_error() {
        let items = new_array(vec![Value::integer(1), Value::integer(2)]);
        let mut calls = 0;
        let result = each(&items, |_| {
            calls += 1;
            Err(ErrorType::TypeError("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
