//! # augment - non-destructive extension methods for primitive values
//!
//! A small library of conveniences layered onto the value kinds of a JavaScript-like
//! host, without ever replacing what the host already provides:
//! - Function: `curry`
//! - Object: `beget`, `toPairs`/`fromPairs`, `map`, `flip`, `translate`,
//!   `reverseTranslation` (and the legacy `map(schema)`/`reverseMap`)
//! - String: `join`, `trim`, `reverse`
//! - Array: `each` (legacy: `forEach`)
//!
//! ## Quick Start
//!
//! ### Calling extensions through the method tables
//!
//! ```
//! use augment::runner::plugin::registry::BuiltInRegistry;
//! use augment::runner::plugin::types::EvalContext;
//! use augment::runner::ds::value::Value;
//!
//! let registry = BuiltInRegistry::with_core();
//! let mut ctx = EvalContext::new();
//!
//! let joined = registry
//!     .call_method(&mut ctx, Value::from("one"), "join", vec![Value::from("two"), Value::from("three")])
//!     .unwrap();
//! assert_eq!(joined, Value::from("onetwothree"));
//! ```
//!
//! ### Translating a payload with a schema
//!
//! ```
//! use augment::parser::parse_literal;
//! use augment::runner::api::Augment;
//!
//! let mut augment = Augment::new();
//! let payload = parse_literal("{ first_name: 'Ada', last_name: 'Lovelace' }").unwrap();
//! let schema = parse_literal("{ first_name: 'firstName', last_name: 'lastName' }").unwrap();
//!
//! let translated = augment.call(payload, "translate", vec![schema]).unwrap();
//! assert_eq!(translated.to_string(), r#"{ firstName: "Ada", lastName: "Lovelace" }"#);
//! ```
//!
//! ### Using the typed functions directly
//!
//! ```
//! use augment::runner::std_lib::string;
//!
//! assert_eq!(string::trim("  foobar  "), "foobar");
//! assert_eq!(string::reverse("foobar"), "raboof");
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - pest grammar for JavaScript-style literal values
//! - **[`runner`]** - Values and the method tables
//!   - **[`runner::ds`]** - Data structures (values, objects, arrays, functions)
//!   - **[`runner::plugin`]** - Method tables, the install-if-absent guard, configuration
//!   - **[`runner::std_lib`]** - Host built-ins and the extensions themselves

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
