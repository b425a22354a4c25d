//! Object extensions.
//!
//! Provides `beget`, pair conversion, key mapping and schema translation on object
//! values. The current revision exposes `toPairs`, `fromPairs`, `map(fn)`, `flip`,
//! `translate` and `reverseTranslation`; the legacy revision exposes `map(schema)`
//! and `reverseMap`, which keep their bookkeeping on the mapped object itself.

use std::collections::HashSet;
use std::rc::Rc;

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::function_object::call_value;
use crate::runner::ds::object::{Object, ObjectRef};
use crate::runner::ds::operations::type_conversion::{is_truthy, to_property_key, type_of};
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::{DuplicateValuePolicy, MissingKeyPolicy, Revision};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

use super::core::install;

/// Field holding the schema a legacy `map` was called with.
pub const MAP_FIELD: &str = "_map";
/// Field holding target-key -> source-key, written by legacy `map`.
pub const REVERSE_MAP_FIELD: &str = "_reverseMap";

/// Install the Object extensions of `revision`.
pub fn register(registry: &mut BuiltInRegistry, revision: Revision) {
    install(registry, "Object", "beget", object_beget);
    match revision {
        Revision::Current => {
            install(registry, "Object", "toPairs", object_to_pairs);
            install(registry, "Object", "fromPairs", object_from_pairs);
            install(registry, "Object", "map", object_map);
            install(registry, "Object", "flip", object_flip);
            install(registry, "Object", "translate", object_translate);
            install(registry, "Object", "reverseTranslation", object_reverse_translation);
        }
        Revision::Legacy => {
            install(registry, "Object", "map", object_map_schema);
            install(registry, "Object", "reverseMap", object_reverse_map);
        }
    }
}

/// A new empty object delegating to `parent`. No constructor logic runs.
pub fn beget(parent: &ObjectRef) -> ObjectRef {
    Object::with_prototype(Rc::clone(parent)).into_ref()
}

/// Own `(key, value)` pairs in enumeration order; inherited keys are excluded.
pub fn to_pairs(obj: &Object) -> Vec<(String, Value)> {
    obj.entries()
}

/// Build an object from pairs in order; a repeated key keeps the last value.
pub fn from_pairs<I, K>(pairs: I) -> Object
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().collect()
}

/// Rebuild `obj` from the pairs `f` returns, one call per own pair.
pub fn map<F>(obj: &Object, mut f: F) -> Result<Object, ErrorType>
where
    F: FnMut(String, Value) -> Result<(String, Value), ErrorType>,
{
    filter_map(obj, |k, v| f(k, v).map(Some))
}

fn filter_map<F>(obj: &Object, mut f: F) -> Result<Object, ErrorType>
where
    F: FnMut(String, Value) -> Result<Option<(String, Value)>, ErrorType>,
{
    let mut mapped = Vec::with_capacity(obj.len());
    for (k, v) in to_pairs(obj) {
        if let Some(pair) = f(k, v)? {
            mapped.push(pair);
        }
    }
    Ok(from_pairs(mapped))
}

/// Swap keys and values. Values become keys through string conversion.
pub fn flip(obj: &Object, duplicates: DuplicateValuePolicy) -> Result<Object, ErrorType> {
    if duplicates == DuplicateValuePolicy::Error {
        let mut seen = HashSet::new();
        for (k, v) in to_pairs(obj) {
            let target = to_property_key(&v);
            if !seen.insert(target.clone()) {
                return Err(ErrorType::InvalidArgument(format!(
                    "Object.flip: value \"{}\" of key \"{}\" is already used by another key",
                    target, k
                )));
            }
        }
    }
    map(obj, |k, v| Ok((to_property_key(&v), Value::String(k))))
}

/// Rename every own key `k` of `obj` to `schema[k]`, keeping the values.
/// `missing` decides what happens to keys the schema has no entry for.
pub fn translate(
    obj: &Object,
    schema: &Object,
    missing: MissingKeyPolicy,
) -> Result<Object, ErrorType> {
    filter_map(obj, |k, v| {
        Ok(resolve_key(schema, k, missing, "translate")?.map(|target| (target, v)))
    })
}

/// `translate(obj, flip(schema))`.
pub fn reverse_translation(
    obj: &Object,
    schema: &Object,
    missing: MissingKeyPolicy,
    duplicates: DuplicateValuePolicy,
) -> Result<Object, ErrorType> {
    let reversed = flip(schema, duplicates)?;
    translate(obj, &reversed, missing)
}

/// Legacy `map(schema)`: the translated fields plus `_map` (the schema) and
/// `_reverseMap` (target key -> source key), so the object can later be reversed
/// without the schema.
pub fn map_with_schema(
    obj: &Object,
    schema: &ObjectRef,
    missing: MissingKeyPolicy,
) -> Result<Object, ErrorType> {
    let mut mapped = Object::new();
    mapped.set(MAP_FIELD, Value::Object(Rc::clone(schema)));
    mapped.set(REVERSE_MAP_FIELD, Value::Undefined);

    let mut reverse = Object::new();
    {
        let schema = schema.borrow();
        for (k, v) in data_pairs(obj) {
            if let Some(target) = resolve_key(&schema, k.clone(), missing, "map")? {
                reverse.set(target.clone(), Value::String(k));
                mapped.set(target, v);
            }
        }
    }
    mapped.set(REVERSE_MAP_FIELD, Value::new_object(reverse));
    Ok(mapped)
}

/// Legacy `reverseMap()`: map the data fields back through `_reverseMap`.
pub fn reverse_map(obj: &Object, missing: MissingKeyPolicy) -> Result<Object, ErrorType> {
    match obj.get(REVERSE_MAP_FIELD) {
        Some(Value::Object(reverse)) => map_with_schema(obj, &reverse, missing),
        _ => Err(ErrorType::InvalidArgument(
            "Object.reverseMap: You must first call Object.map in order to reverse a mapping"
                .to_string(),
        )),
    }
}

/// Own pairs minus the legacy bookkeeping fields.
fn data_pairs(obj: &Object) -> Vec<(String, Value)> {
    to_pairs(obj)
        .into_iter()
        .filter(|(k, _)| k != MAP_FIELD && k != REVERSE_MAP_FIELD)
        .collect()
}

/// The schema's target for `key`, or what `missing` says to do without one.
/// Only an absent or `undefined` entry counts as missing.
fn resolve_key(
    schema: &Object,
    key: String,
    missing: MissingKeyPolicy,
    method: &str,
) -> Result<Option<String>, ErrorType> {
    match schema.get(&key) {
        Some(target) if !target.is_undefined() => Ok(Some(to_property_key(&target))),
        _ => match missing {
            MissingKeyPolicy::Keep => Ok(Some(key)),
            MissingKeyPolicy::Drop => Ok(None),
            MissingKeyPolicy::Error => Err(ErrorType::InvalidArgument(format!(
                "Object.{}: schema has no entry for \"{}\"",
                method, key
            ))),
        },
    }
}

/// The schema argument; a missing or falsy one is an invalid argument.
fn schema_arg(args: &[Value], method: &str) -> Result<ObjectRef, ErrorType> {
    match args.first() {
        Some(Value::Object(schema)) => Ok(Rc::clone(schema)),
        Some(v) if is_truthy(v) => Err(ErrorType::InvalidArgument(format!(
            "Object.{}: schema must be an object, got {}",
            method,
            type_of(v)
        ))),
        _ => Err(ErrorType::InvalidArgument(format!(
            "Object.{}: You must pass in a schema Object to map to",
            method
        ))),
    }
}

/// The receiver as an object. Arrays are viewed as objects keyed by index.
fn receiver_object(this: &Value, method: &str) -> Result<ObjectRef, ErrorType> {
    match this {
        Value::Object(o) => Ok(Rc::clone(o)),
        Value::Array(items) => Ok(items
            .borrow()
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx.to_string(), v.clone()))
            .collect::<Object>()
            .into_ref()),
        other => Err(ErrorType::TypeError(format!(
            "Object.{} called on {}",
            method,
            type_of(other)
        ))),
    }
}

fn pair_value(key: String, value: Value) -> Value {
    Value::new_array(vec![Value::String(key), value])
}

/// Read a `[key, value]` pair array back; a missing value is `undefined`.
fn pair_from_value(pair: &Value, method: &str) -> Result<(String, Value), ErrorType> {
    match pair {
        Value::Array(items) => {
            let items = items.borrow();
            let key = to_property_key(items.get(0).unwrap_or(&Value::Undefined));
            let value = items.get(1).cloned().unwrap_or(Value::Undefined);
            Ok((key, value))
        }
        other => Err(ErrorType::TypeError(format!(
            "Object.{}: expected a [key, value] pair, got {}",
            method, other
        ))),
    }
}

/// Object.prototype.beget
fn object_beget(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    match args.first() {
        Some(Value::Object(parent)) => Ok(Value::Object(beget(parent))),
        Some(v) if is_truthy(v) => Err(ErrorType::TypeError(format!(
            "Object.beget: prototype must be an object, got {}",
            type_of(v)
        ))),
        _ => match &this {
            Value::Object(parent) => Ok(Value::Object(beget(parent))),
            other => Err(ErrorType::TypeError(format!(
                "Object.beget called on {}",
                type_of(other)
            ))),
        },
    }
}

/// Object.prototype.toPairs
fn object_to_pairs(
    _ctx: &mut EvalContext,
    this: Value,
    _args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let obj = receiver_object(&this, "toPairs")?;
    let pairs = to_pairs(&obj.borrow())
        .into_iter()
        .map(|(k, v)| pair_value(k, v))
        .collect();
    Ok(Value::new_array(pairs))
}

/// Object.prototype.fromPairs
///
/// Takes the pairs as the first argument, or from the receiver when it is an array.
fn object_from_pairs(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let source = match args.first() {
        Some(pairs) => pairs.clone(),
        None => this,
    };
    let pairs = match &source {
        Value::Array(items) => items
            .borrow()
            .iter()
            .map(|p| pair_from_value(p, "fromPairs"))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(ErrorType::TypeError(format!(
                "Object.fromPairs: expected an array of pairs, got {}",
                type_of(other)
            )))
        }
    };
    Ok(Value::new_object(from_pairs(pairs)))
}

/// Object.prototype.map (current revision): `f` receives each `[key, value]` pair
/// and returns the replacement pair.
fn object_map(ctx: &mut EvalContext, this: Value, args: Vec<Value>) -> Result<Value, ErrorType> {
    let obj = receiver_object(&this, "map")?;
    let f = match args.first() {
        Some(f) if f.is_callable() => f.clone(),
        other => {
            return Err(ErrorType::TypeError(format!(
                "Object.map: {} is not a function",
                other.unwrap_or(&Value::Undefined)
            )))
        }
    };
    // The callback may touch the receiver, so map over a detached copy.
    let snapshot = from_pairs(to_pairs(&obj.borrow()));
    let mapped = map(&snapshot, |k, v| {
        let replacement = call_value(&f, ctx, Value::Undefined, vec![pair_value(k, v)])?;
        pair_from_value(&replacement, "map")
    })?;
    Ok(Value::new_object(mapped))
}

/// Object.prototype.flip
fn object_flip(ctx: &mut EvalContext, this: Value, _args: Vec<Value>) -> Result<Value, ErrorType> {
    let obj = receiver_object(&this, "flip")?;
    let flipped = flip(&obj.borrow(), ctx.config.duplicate_values)?;
    Ok(Value::new_object(flipped))
}

/// Object.prototype.translate
fn object_translate(
    ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let schema = schema_arg(&args, "translate")?;
    let obj = receiver_object(&this, "translate")?;
    let translated = translate(&obj.borrow(), &schema.borrow(), ctx.config.missing_key)?;
    Ok(Value::new_object(translated))
}

/// Object.prototype.reverseTranslation
fn object_reverse_translation(
    ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let schema = schema_arg(&args, "reverseTranslation")?;
    let obj = receiver_object(&this, "reverseTranslation")?;
    let translated = reverse_translation(
        &obj.borrow(),
        &schema.borrow(),
        ctx.config.missing_key,
        ctx.config.duplicate_values,
    )?;
    Ok(Value::new_object(translated))
}

/// Object.prototype.map (legacy revision)
fn object_map_schema(
    ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let schema = schema_arg(&args, "map")?;
    let obj = receiver_object(&this, "map")?;
    let mapped = map_with_schema(&obj.borrow(), &schema, ctx.config.missing_key)?;
    Ok(Value::new_object(mapped))
}

/// Object.prototype.reverseMap (legacy revision)
fn object_reverse_map(
    ctx: &mut EvalContext,
    this: Value,
    _args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let obj = receiver_object(&this, "reverseMap")?;
    let reversed = reverse_map(&obj.borrow(), ctx.config.missing_key)?;
    Ok(Value::new_object(reversed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Object {
        Object::new()
            .insert("first_name", Value::from("Ada"))
            .insert("last_name", Value::from("Lovelace"))
    }

    fn schema() -> Object {
        Object::new()
            .insert("first_name", Value::from("firstName"))
            .insert("last_name", Value::from("lastName"))
    }

    #[test]
    fn test_translate_missing_key_policies() {
        let obj = sample().insert("age", Value::integer(36));
        let schema = schema();

        let kept = translate(&obj, &schema, MissingKeyPolicy::Keep).unwrap();
        assert_eq!(kept.own_keys(), vec!["firstName", "lastName", "age"]);

        let dropped = translate(&obj, &schema, MissingKeyPolicy::Drop).unwrap();
        assert_eq!(dropped.own_keys(), vec!["firstName", "lastName"]);

        let err = translate(&obj, &schema, MissingKeyPolicy::Error).unwrap_err();
        assert_eq!(
            err,
            ErrorType::InvalidArgument("Object.translate: schema has no entry for \"age\"".to_string())
        );
    }

    #[test]
    fn test_translate_reads_inherited_schema_entries() {
        let base = schema().into_ref();
        let derived = Object::with_prototype(base);
        let translated = translate(&sample(), &derived, MissingKeyPolicy::Error).unwrap();
        assert_eq!(translated.get_own("firstName"), Some(&Value::from("Ada")));
    }

    #[test]
    fn test_flip_duplicate_policy() {
        let obj = Object::new()
            .insert("a", Value::from("x"))
            .insert("b", Value::from("x"));
        let flipped = flip(&obj, DuplicateValuePolicy::LastWins).unwrap();
        assert_eq!(to_pairs(&flipped), vec![("x".to_string(), Value::from("b"))]);
        assert!(flip(&obj, DuplicateValuePolicy::Error)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_map_with_schema_records_reverse_map() {
        let schema = schema().into_ref();
        let mapped = map_with_schema(&sample(), &schema, MissingKeyPolicy::Keep).unwrap();
        assert_eq!(
            mapped.own_keys(),
            vec!["_map", "_reverseMap", "firstName", "lastName"]
        );
        assert_eq!(mapped.get_own(MAP_FIELD), Some(&Value::Object(Rc::clone(&schema))));

        let restored = reverse_map(&mapped, MissingKeyPolicy::Keep).unwrap();
        assert_eq!(
            data_pairs(&restored),
            vec![
                ("first_name".to_string(), Value::from("Ada")),
                ("last_name".to_string(), Value::from("Lovelace")),
            ]
        );
    }

    #[test]
    fn test_receiver_object_views_arrays_by_index() {
        let this = Value::new_array(vec![Value::from("a"), Value::from("b")]);
        let obj = receiver_object(&this, "toPairs").unwrap();
        assert_eq!(obj.borrow().own_keys(), vec!["0", "1"]);
    }
}
