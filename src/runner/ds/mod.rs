pub mod array_object;
pub mod error;
pub mod function_object;
pub mod object;
pub mod operations;
pub mod value;
