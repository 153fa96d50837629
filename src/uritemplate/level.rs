//! RFC 6570 conformance levels
//!
//! The RFC groups template features into four levels (section 1.2). Expansion
//! supports all of them. Extraction compiles one capture group per expression, so
//! it is only reliable while every expression holds a single unmodified variable,
//! which is what levels 1 and 2 guarantee.

use super::operator::{Operator, OperatorKind};
use super::varspec::VarSpec;
use std::fmt;

/// Highest level whose templates expand correctly
pub const SUPPORTED_EXPANSION_LEVEL: Level = Level::Four;

/// Highest level whose templates extract correctly
pub const SUPPORTED_EXTRACTION_LEVEL: Level = Level::Two;

/// A template feature level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Simple string expansion of single variables
    One = 1,
    /// Adds reserved `{+var}` and fragment `{#var}` expansion
    Two = 2,
    /// Adds multiple variables per expression and the `. / ; ? &` operators
    Three = 3,
    /// Adds the explode `*` and prefix `:N` modifiers
    Four = 4,
}

impl Level {
    /// Level from its number, `None` outside `1..=4`
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            3 => Some(Level::Three),
            4 => Some(Level::Four),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Level needed by one expression
    pub fn of_expression(op: &Operator, specs: &[VarSpec<'_>]) -> Self {
        if specs.iter().any(VarSpec::has_modifier) {
            return Level::Four;
        }
        if specs.len() > 1 {
            return Level::Three;
        }
        match op.kind {
            OperatorKind::Simple => Level::One,
            OperatorKind::Reserved | OperatorKind::Fragment => Level::Two,
            OperatorKind::Label
            | OperatorKind::PathSegment
            | OperatorKind::PathParameter
            | OperatorKind::FormQuery
            | OperatorKind::FormContinuation => Level::Three,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
