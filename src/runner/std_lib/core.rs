//! Core registration.
//!
//! This module provides the functions that fill a [`BuiltInRegistry`]: the host
//! surface and the extension surface.

use crate::runner::plugin::config::Revision;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInFn, BuiltInObject, NativeFn};

use super::array;
use super::function;
use super::native;
use super::object;
use super::string;

/// Kinds that always have a table, so lookups can fall through to `Object`.
const KINDS: [&str; 6] = ["Object", "Function", "String", "Array", "Number", "Boolean"];

/// Register the built-ins a modern host already provides.
pub fn register_native_builtins(registry: &mut BuiltInRegistry) {
    ensure_kind_tables(registry);
    native::register(registry);
}

/// Install every extension of `revision`. Names already taken are left alone.
pub fn register_extensions(registry: &mut BuiltInRegistry, revision: Revision) {
    ensure_kind_tables(registry);
    // Register in order (Object's extensions build on each other)
    function::register(registry, revision);
    object::register(registry, revision);
    string::register(registry, revision);
    array::register(registry, revision);
}

/// Install-if-absent for a compiled-in method.
pub(crate) fn install(
    registry: &mut BuiltInRegistry,
    kind: &str,
    name: &str,
    func: NativeFn,
) -> bool {
    registry.define_method(kind, name, BuiltInFn::Native(func))
}

fn ensure_kind_tables(registry: &mut BuiltInRegistry) {
    for kind in KINDS.iter() {
        if !registry.has_object(kind) {
            registry.register_object(BuiltInObject::for_kind(kind));
        }
    }
}
