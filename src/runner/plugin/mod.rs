//! Method tables and the install-if-absent guard.
//!
//! Every value kind (`Object`, `Function`, `String`, `Array`, `Number`, `Boolean`)
//! owns a [`BuiltInObject`] table of methods. Tables name a parent table, so a
//! lookup that misses on `String` continues on `Object`:
//!
//! ```text
//! Method Lookup Order:
//! 1. Callable property on the receiver or its prototype chain (objects only)
//! 2. The receiver kind's table
//! 3. Parent tables, up to `Object`
//! ```
//!
//! Extensions are added with [`BuiltInRegistry::define_method`], which refuses to
//! replace a name that is already taken. Loading the host built-ins first therefore
//! keeps their behavior intact.
//!
//! ## Example
//!
//! ```
//! use augment::runner::plugin::registry::BuiltInRegistry;
//! use augment::runner::plugin::types::EvalContext;
//! use augment::runner::ds::value::Value;
//!
//! let registry = BuiltInRegistry::with_core();
//! let mut ctx = EvalContext::new();
//! let reversed = registry
//!     .call_method(&mut ctx, Value::from("foobar"), "reverse", vec![])
//!     .unwrap();
//! assert_eq!(reversed, Value::from("raboof"));
//! ```

pub mod config;
pub mod registry;
pub mod types;

pub use config::AugmentConfig;
pub use registry::BuiltInRegistry;
pub use types::{BuiltInFn, BuiltInObject, EvalContext, NativeFn};
