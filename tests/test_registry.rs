extern crate augment;

use augment::runner::ds::error::ErrorType;
use augment::runner::ds::function_object::FunctionObject;
use augment::runner::ds::object::Object;
use augment::runner::ds::value::Value;
use augment::runner::plugin::config::{AugmentConfig, Revision};
use augment::runner::plugin::registry::{BuiltInRegistry, RegistryError};
use augment::runner::plugin::types::{BuiltInFn, EvalContext};
use augment::runner::std_lib::register_extensions;
use std::cell::RefCell;
use std::rc::Rc;

fn legacy() -> AugmentConfig {
    let mut config = AugmentConfig::default();
    config.revision = Revision::Legacy;
    config
}

fn counting_callback(calls: Rc<RefCell<Vec<Vec<Value>>>>) -> Value {
    Value::Function(FunctionObject::closure("count", move |_ctx, _this, args| {
        calls.borrow_mut().push(args);
        Ok(Value::Undefined)
    }))
}

fn shout(_ctx: &mut EvalContext, _this: Value, _args: Vec<Value>) -> Result<Value, ErrorType> {
    Ok(Value::from("user reverse"))
}

// ── Installer tests ──────────────────────────────────────────────────

#[test]
fn test_extensions_install_every_current_method() {
    let registry = BuiltInRegistry::with_extensions();
    for (kind, method) in &[
        ("Function", "curry"),
        ("Object", "beget"),
        ("Object", "toPairs"),
        ("Object", "fromPairs"),
        ("Object", "map"),
        ("Object", "flip"),
        ("Object", "translate"),
        ("Object", "reverseTranslation"),
        ("String", "join"),
        ("String", "trim"),
        ("String", "reverse"),
        ("Array", "each"),
    ] {
        assert!(registry.has_method(kind, method), "{}.{}", kind, method);
    }
    assert!(!registry.has_method("Array", "forEach"));
    assert!(!registry.has_method("Object", "reverseMap"));
    assert!(registry.skipped().is_empty());
}

#[test]
fn test_extensions_install_every_legacy_method() {
    let registry = BuiltInRegistry::with_extensions_for(&legacy());
    for (kind, method) in &[
        ("Function", "curry"),
        ("Object", "beget"),
        ("Object", "map"),
        ("Object", "reverseMap"),
        ("String", "join"),
        ("String", "trim"),
        ("String", "reverse"),
        ("Array", "forEach"),
    ] {
        assert!(registry.has_method(kind, method), "{}.{}", kind, method);
    }
    assert!(!registry.has_method("Array", "each"));
    assert!(!registry.has_method("Object", "translate"));
}

#[test]
fn test_installing_twice_changes_nothing() {
    let mut registry = BuiltInRegistry::with_extensions();
    let installed = registry.installed().len();
    register_extensions(&mut registry, Revision::Current);
    assert_eq!(registry.installed().len(), installed);
    assert_eq!(registry.skipped().len(), installed);
}

#[test]
fn test_existing_method_is_never_overwritten() {
    let mut registry = BuiltInRegistry::new();
    registry.define_method("String", "reverse", BuiltInFn::Native(shout));
    register_extensions(&mut registry, Revision::Current);

    let mut ctx = EvalContext::new();
    let result = registry
        .call_method(&mut ctx, Value::from("abc"), "reverse", vec![])
        .unwrap();
    assert_eq!(result, Value::from("user reverse"));
    assert_eq!(registry.skipped(), &["String.reverse".to_string()]);
}

#[test]
fn test_inherited_method_is_never_shadowed() {
    let mut registry = BuiltInRegistry::with_core();
    let replacement = BuiltInFn::Dynamic(Box::new(
        |_ctx: &mut EvalContext, _this: Value, _args: Vec<Value>| Ok(Value::from("replaced")),
    ));

    // Arrays reach Object.hasOwnProperty through the parent table.
    assert!(!registry.define_method("Array", "hasOwnProperty", replacement));
    assert!(!registry.has_method("Array", "hasOwnProperty"));
    assert!(registry
        .skipped()
        .contains(&"Array.hasOwnProperty".to_string()));

    let mut ctx = EvalContext::new();
    let result = registry
        .call_method(
            &mut ctx,
            Value::new_array(vec![]),
            "hasOwnProperty",
            vec![Value::from("0")],
        )
        .unwrap();
    assert_eq!(result, Value::Boolean(false));
}

#[test]
fn test_new_table_sees_parent_methods() {
    let mut registry = BuiltInRegistry::new();
    registry.define_method("Object", "reverse", BuiltInFn::Native(shout));
    // The Symbol table does not exist yet; once created it inherits from Object.
    assert!(!registry.define_method("Symbol", "reverse", BuiltInFn::Native(shout)));
    assert!(registry.has_object("Symbol"));
    assert!(!registry.has_method("Symbol", "reverse"));
}

// ── Host precedence tests ────────────────────────────────────────────

#[test]
fn test_host_trim_is_kept() {
    let registry = BuiltInRegistry::with_core();
    assert!(registry.skipped().contains(&"String.trim".to_string()));
    assert!(!registry.installed().contains(&"String.trim".to_string()));

    let mut ctx = EvalContext::new();
    let trimmed = registry
        .call_method(&mut ctx, Value::from("  x  "), "trim", vec![])
        .unwrap();
    assert_eq!(trimmed, Value::from("x"));
}

#[test]
fn test_host_for_each_is_kept_in_legacy_revision() {
    let registry = BuiltInRegistry::with_core_for(&legacy());
    assert!(registry.skipped().contains(&"Array.forEach".to_string()));

    let calls = Rc::new(RefCell::new(vec![]));
    let items = Value::new_array(vec![Value::from("a"), Value::from("b")]);
    let mut ctx = EvalContext::new();
    let result = registry
        .call_method(
            &mut ctx,
            items.clone(),
            "forEach",
            vec![counting_callback(Rc::clone(&calls))],
        )
        .unwrap();

    // Host forEach: (item, index, array) and no chaining.
    assert_eq!(result, Value::Undefined);
    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], vec![Value::from("b"), Value::integer(1), items]);
}

#[test]
fn test_each_is_added_next_to_host_for_each() {
    let registry = BuiltInRegistry::with_core();
    assert!(registry.has_method("Array", "forEach"));
    assert!(registry.has_method("Array", "each"));

    let items = Value::new_array(vec![Value::integer(1)]);
    let calls = Rc::new(RefCell::new(vec![]));
    let mut ctx = EvalContext::new();
    let result = registry
        .call_method(
            &mut ctx,
            items.clone(),
            "each",
            vec![counting_callback(Rc::clone(&calls))],
        )
        .unwrap();
    assert_eq!(result, items);
    assert_eq!(*calls.borrow(), vec![vec![Value::integer(1)]]);
}

// ── Dispatch tests ───────────────────────────────────────────────────

#[test]
fn test_own_callable_property_wins_over_table() {
    let registry = BuiltInRegistry::with_extensions();
    let own = Value::Function(FunctionObject::closure("own", |_ctx, _this, _args| {
        Ok(Value::from("own translate"))
    }));
    let obj = Value::new_object(Object::new().insert("translate", own));
    let mut ctx = EvalContext::new();
    let result = registry
        .call_method(&mut ctx, obj, "translate", vec![])
        .unwrap();
    assert_eq!(result, Value::from("own translate"));
}

#[test]
fn test_non_callable_property_does_not_shadow_table() {
    let registry = BuiltInRegistry::with_extensions();
    let obj = Value::new_object(Object::new().insert("flip", Value::from("not a function")));
    let mut ctx = EvalContext::new();
    let result = registry.call_method(&mut ctx, obj, "flip", vec![]).unwrap();
    assert_eq!(result.to_string(), r#"{ "not a function": "flip" }"#);
}

#[test]
fn test_array_falls_through_to_object_table() {
    let registry = BuiltInRegistry::with_extensions();
    let items = Value::new_array(vec![Value::from("x"), Value::from("y")]);
    let mut ctx = EvalContext::new();
    let pairs = registry
        .call_method(&mut ctx, items, "toPairs", vec![])
        .unwrap();
    assert_eq!(pairs.to_string(), r#"[["0", "x"], ["1", "y"]]"#);
}

#[test]
fn test_unknown_method_is_type_error() {
    let registry = BuiltInRegistry::with_core();
    let mut ctx = EvalContext::new();
    let err = registry
        .call_method(&mut ctx, Value::new_object(Object::new()), "nope", vec![])
        .unwrap_err();
    assert_eq!(
        err,
        ErrorType::TypeError("Object.nope is not a function".to_string())
    );
}

#[test]
fn test_require_method_reports_what_is_missing() {
    let registry = BuiltInRegistry::with_extensions();
    assert!(registry.require_method("Array", "beget").is_ok());
    assert_eq!(
        registry.require_method("Array", "nope").unwrap_err(),
        RegistryError::MethodNotFound("Array".to_string(), "nope".to_string())
    );
    assert_eq!(
        registry.require_method("Symbol", "nope").unwrap_err(),
        RegistryError::ObjectNotFound("Symbol".to_string())
    );
}

#[test]
fn test_curried_function_works_with_host_call() {
    let registry = BuiltInRegistry::with_core();
    let echo = Value::Function(FunctionObject::closure("echo", |_ctx, _this, args| {
        Ok(Value::new_array(args))
    }));
    let mut ctx = EvalContext::new();
    let curried = registry
        .call_method(&mut ctx, echo, "curry", vec![Value::integer(1)])
        .unwrap();
    let result = registry
        .call_method(
            &mut ctx,
            curried,
            "call",
            vec![Value::Null, Value::integer(2)],
        )
        .unwrap();
    assert_eq!(result.to_string(), "[1, 2]");
}
