use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum ErrorType {
    InvalidArgument(String),
    TypeError(String),
    SyntaxError(String),
}
impl ErrorType {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ErrorType::InvalidArgument(_))
    }
}
impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::InvalidArgument(m) => write!(f, "Uncaught invalid argument: {}.", m),
            ErrorType::TypeError(m) => write!(f, "Uncaught type error: {}.", m),
            ErrorType::SyntaxError(m) => write!(f, "Uncaught syntax error: {}.", m),
        }
    }
}

impl std::error::Error for ErrorType {}
