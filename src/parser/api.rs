use pest_consume::{match_nodes, Error, Parser};

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::object::Object;
use crate::runner::ds::operations::type_conversion::to_property_key;
use crate::runner::ds::value::{NumberType, Value};

type ParseResult<T> = std::result::Result<T, Error<Rule>>;
type Node<'i> = pest_consume::Node<'i, Rule, ()>;

#[derive(Parser)]
#[grammar = "parser/literal.pest"] // relative to src
pub struct LiteralParser;

#[pest_consume::parser]
impl LiteralParser {
    #[allow(non_snake_case)]
    fn EOI(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn literal(input: Node) -> ParseResult<Value> {
        Ok(match_nodes!(input.into_children();
            [value(v), EOI(_)] => v,
        ))
    }

    fn value(input: Node) -> ParseResult<Value> {
        Ok(match_nodes!(input.into_children();
            [object(o)] => Value::new_object(o),
            [array(items)] => Value::new_array(items),
            [string(s)] => Value::String(s),
            [number(n)] => Value::Number(n),
            [boolean(b)] => Value::Boolean(b),
            [null(v)] => v,
            [undefined(v)] => v,
        ))
    }

    fn object(input: Node) -> ParseResult<Object> {
        Ok(match_nodes!(input.into_children();
            [property(props)..] => props.collect(),
        ))
    }

    fn property(input: Node) -> ParseResult<(String, Value)> {
        Ok(match_nodes!(input.into_children();
            [key(k), value(v)] => (k, v),
        ))
    }

    fn key(input: Node) -> ParseResult<String> {
        Ok(match_nodes!(input.into_children();
            [string(s)] => s,
            [identifier(s)] => s,
            [number(n)] => to_property_key(&Value::Number(n)),
        ))
    }

    fn identifier(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }

    fn array(input: Node) -> ParseResult<Vec<Value>> {
        Ok(match_nodes!(input.into_children();
            [value(items)..] => items.collect(),
        ))
    }

    fn string(input: Node) -> ParseResult<String> {
        Ok(match_nodes!(input.into_children();
            [dq_chars(s)] => s,
            [sq_chars(s)] => s,
        ))
    }

    fn dq_chars(input: Node) -> ParseResult<String> {
        unescape(input.as_str()).map_err(|e| input.error(e))
    }

    fn sq_chars(input: Node) -> ParseResult<String> {
        unescape(input.as_str()).map_err(|e| input.error(e))
    }

    fn number(input: Node) -> ParseResult<NumberType> {
        parse_number(input.as_str())
            .ok_or_else(|| input.error(format!("invalid number {}", input.as_str())))
    }

    fn boolean(input: Node) -> ParseResult<bool> {
        Ok(input.as_str() == "true")
    }

    fn null(_input: Node) -> ParseResult<Value> {
        Ok(Value::Null)
    }

    fn undefined(_input: Node) -> ParseResult<Value> {
        Ok(Value::Undefined)
    }
}

impl LiteralParser {
    /// Parse a JavaScript-style literal (`{ a: [1, 'x'] }`, `"text"`, `null`, ...)
    /// into a [`Value`].
    pub fn parse_literal(text: &str) -> Result<Value, ErrorType> {
        let nodes = LiteralParser::parse(Rule::literal, text).map_err(syntax_error)?;
        let node = nodes.single().map_err(syntax_error)?;
        LiteralParser::literal(node).map_err(syntax_error)
    }
}

fn syntax_error(e: Error<Rule>) -> ErrorType {
    ErrorType::SyntaxError(e.to_string())
}

/// Integers stay integers unless they overflow; anything with a fraction or an
/// exponent is a float.
fn parse_number(text: &str) -> Option<NumberType> {
    let is_float = text.contains(|c| c == '.' || c == 'e' || c == 'E');
    if !is_float {
        if let Ok(i) = text.parse::<i64>() {
            return Some(NumberType::Integer(i));
        }
    }
    text.parse::<f64>().ok().map(NumberType::Float)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('v') => out.push('\u{000B}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let mut code = hex_unit(&hex)?;
                // A high surrogate directly followed by a low one escapes a single
                // character outside the BMP.
                if (0xD800..=0xDBFF).contains(&code) {
                    let mut ahead = chars.clone();
                    if ahead.next() == Some('\\') && ahead.next() == Some('u') {
                        let low_hex: String = ahead.by_ref().take(4).collect();
                        if let Ok(low) = hex_unit(&low_hex) {
                            if (0xDC00..=0xDFFF).contains(&low) {
                                code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                                chars = ahead;
                            }
                        }
                    }
                }
                let decoded = char::from_u32(code)
                    .ok_or_else(|| format!("\\u{} is not a character on its own", hex))?;
                out.push(decoded);
            }
            // Line continuation
            Some('\n') => {}
            Some(other) => out.push(other),
            None => return Err("dangling escape".to_string()),
        }
    }
    Ok(out)
}

/// The code unit spelled by the four hex digits of a `\u` escape.
fn hex_unit(hex: &str) -> Result<u32, String> {
    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
        return Err(format!("invalid unicode escape \\u{}", hex));
    }
    u32::from_str_radix(hex, 16).map_err(|_| format!("invalid unicode escape \\u{}", hex))
}
