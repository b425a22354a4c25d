//! String extensions.
//!
//! Provides `join`, `trim` and `reverse` on string values.

use std::collections::HashSet;

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::operations::type_conversion::{to_string, to_string_or_empty};
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::Revision;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

use super::core::install;

lazy_static! {
    /// WhiteSpace and LineTerminator code points as the host's `\s` matches them.
    static ref WHITESPACE: HashSet<char> = [
        '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}', '\u{00A0}',
        '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
        '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{2028}', '\u{2029}',
        '\u{202F}', '\u{205F}', '\u{3000}', '\u{FEFF}',
    ]
    .iter()
    .cloned()
    .collect();
}

/// Install the String extensions. Both revisions carry the same set.
pub fn register(registry: &mut BuiltInRegistry, _revision: Revision) {
    install(registry, "String", "join", string_join);
    install(registry, "String", "trim", string_trim);
    install(registry, "String", "reverse", string_reverse);
}

pub fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(&c)
}

/// Concatenate `base` and every part, with no separator.
pub fn join<S: AsRef<str>>(base: &str, parts: &[S]) -> String {
    let extra: usize = parts.iter().map(|p| p.as_ref().len()).sum();
    let mut joined = String::with_capacity(base.len() + extra);
    joined.push_str(base);
    for part in parts {
        joined.push_str(part.as_ref());
    }
    joined
}

/// Strip leading and trailing whitespace; the interior is left as is.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_whitespace)
}

/// Reverse the character order.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Flatten `join` arguments the way `[this].concat(args).join('')` does: array
/// arguments contribute their elements, and `null`/`undefined` become "".
fn join_parts(args: &[Value]) -> Vec<String> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Value::Array(items) => parts.extend(items.borrow().iter().map(to_string_or_empty)),
            other => parts.push(to_string_or_empty(other)),
        }
    }
    parts
}

/// String.prototype.join
fn string_join(
    _ctx: &mut EvalContext,
    this: Value,
    args: Vec<Value>,
) -> Result<Value, ErrorType> {
    let base = to_string(&this);
    if args.is_empty() {
        return Ok(Value::String(base));
    }
    Ok(Value::String(join(&base, &join_parts(&args))))
}

/// String.prototype.trim
fn string_trim(
    _ctx: &mut EvalContext,
    this: Value,
    _args: Vec<Value>,
) -> Result<Value, ErrorType> {
    Ok(Value::from(trim(&to_string(&this))))
}

/// String.prototype.reverse
fn string_reverse(
    _ctx: &mut EvalContext,
    this: Value,
    _args: Vec<Value>,
) -> Result<Value, ErrorType> {
    Ok(Value::String(reverse(&to_string(&this))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_uses_host_whitespace() {
        assert_eq!(trim("\u{FEFF}\u{00A0} foo bar\t\n\u{2029}"), "foo bar");
        // U+200B is not whitespace to the host either.
        assert_eq!(trim("\u{200B}x"), "\u{200B}x");
    }

    #[test]
    fn test_join_parts_flattens_one_level() {
        let nested = Value::new_array(vec![Value::from("x")]);
        let args = vec![
            Value::new_array(vec![Value::from("a"), Value::Null, nested]),
            Value::Undefined,
            Value::integer(3),
        ];
        assert_eq!(join_parts(&args), vec!["a", "", "x", "", "3"]);
    }

    #[test]
    fn test_reverse_keeps_multibyte_chars_whole() {
        assert_eq!(reverse("añb"), "bña");
        assert_eq!(reverse(""), "");
    }

    #[test]
    fn test_join_with_self_containing_array() {
        let looped = Value::new_array(vec![Value::from("a")]);
        looped.as_array().unwrap().borrow_mut().push(looped.clone());

        let mut ctx = EvalContext::new();
        let joined = string_join(&mut ctx, Value::from("x"), vec![looped.clone()]).unwrap();
        assert_eq!(joined, Value::from("xaa,"));

        let wrapped = Value::new_array(vec![looped.clone()]);
        let joined = string_join(&mut ctx, Value::from("x"), vec![wrapped]).unwrap();
        assert_eq!(joined, Value::from("xa,"));

        looped.as_array().unwrap().borrow_mut().clear();
    }
}
