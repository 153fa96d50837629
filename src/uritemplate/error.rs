//! Error types
//!
//! Expansion never fails. These cover the two places that can: compiling the
//! extraction pattern, and turning loosely typed JSON into a [Value](super::value::Value).

use std::fmt;

/// Errors produced while compiling a template into an extraction pattern
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The generated regex was rejected by the regex engine
    InvalidPattern(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidPattern(msg) => write!(f, "Invalid extraction pattern: {msg}"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Errors produced while converting external data into variable bindings
#[derive(Debug, Clone, PartialEq)]
pub enum BindingsError {
    /// A list or map member was itself a list or map
    NestedValue(String),
    /// The top-level bindings document was not an object
    NotAnObject(String),
    /// The bindings document could not be parsed
    Malformed(String),
}

impl fmt::Display for BindingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingsError::NestedValue(what) => {
                write!(f, "Nested value not allowed: {what}")
            }
            BindingsError::NotAnObject(kind) => {
                write!(f, "Variables must be a JSON object, got {kind}")
            }
            BindingsError::Malformed(msg) => write!(f, "Malformed variables: {msg}"),
        }
    }
}

impl std::error::Error for BindingsError {}
