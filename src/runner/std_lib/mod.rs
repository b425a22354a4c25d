//! Method implementations.
//!
//! `native` holds the few built-ins a modern host already ships; the other modules
//! hold the extensions, one module per value kind.

pub mod array;
pub mod core;
pub mod function;
pub mod native;
pub mod object;
pub mod string;

pub use self::core::{register_extensions, register_native_builtins};
