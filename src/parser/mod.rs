mod api;

pub use api::{LiteralParser, Rule};

use crate::runner::ds::error::ErrorType;
use crate::runner::ds::value::Value;

/// Parse a JavaScript-style literal into a [`Value`].
pub fn parse_literal(text: &str) -> Result<Value, ErrorType> {
    LiteralParser::parse_literal(text)
}
