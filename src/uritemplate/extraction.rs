//! Extraction pattern compiler
//!
//! Turns a template into an anchored regex that matches its expansions. Literal
//! runs are escaped verbatim and every expression becomes exactly one capture
//! group, wrapped so the whole expression may be absent:
//!
//! ```text
//! {var}         ([A-Za-z0-9%_.~,\-]+)?
//! {+var}        (.+)?
//! {#var}        (?:\#(.*))?
//! {?var}        (?:\?var=(.*))?
//! {;var}        (?:;var=?(.*))?
//! {?x,y}        (?:\?(.*))?
//! ```
//!
//! Single-variable expressions without modifiers get the operator's `name=`
//! text outside the group, so the group holds exactly the encoded value. Any
//! other expression captures its full expansion (minus the prefix) in one group.

use super::error::PatternError;
use super::operator::{Naming, Operator, OperatorKind};
use super::scanner::{Scanner, Segment};
use super::varspec::parse_varspecs;
use regex::Regex;
use tracing::debug;

/// Unreserved characters, `%` for triplets and `,` for joined values
const SIMPLE_GROUP: &str = r"([A-Za-z0-9%_.~,\-]+)?";

/// A compiled extraction pattern with one capture group per expression
#[derive(Debug, Clone)]
pub struct ExtractionPattern {
    regex: Regex,
}

impl ExtractionPattern {
    /// Compile the pattern for a template
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let source = pattern_source(template);
        let regex = Regex::new(&source).map_err(|e| PatternError::InvalidPattern(e.to_string()))?;
        debug!(template, pattern = %source, "compiled extraction pattern");

        Ok(Self { regex })
    }

    /// The regex source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of capture groups, one per expression
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Match a whole URI.
    ///
    /// Returns one entry per expression in template order; `None` entries are
    /// expressions that matched nothing.
    pub fn captures<'h>(&self, uri: &'h str) -> Option<Vec<Option<&'h str>>> {
        let captures = self.regex.captures(uri)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str()))
                .collect(),
        )
    }
}

/// Build the anchored regex source for a template.
pub fn pattern_source(template: &str) -> String {
    let mut pattern = String::from("^");
    for segment in Scanner::new(template) {
        match segment {
            Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
            Segment::Expression(body) => pattern.push_str(&expression_pattern(body)),
        }
    }
    pattern.push('$');
    pattern
}

fn expression_pattern(body: &str) -> String {
    let (op, body) = Operator::select(body);
    if op.kind == OperatorKind::Simple {
        return SIMPLE_GROUP.to_string();
    }

    let specs = parse_varspecs(body);
    let mut lead = regex::escape(op.prefix);

    match specs.as_slice() {
        [spec] if op.naming.is_named() && !spec.has_modifier() => {
            lead.push_str(&regex::escape(spec.name));
            lead.push_str(match op.naming {
                Naming::NamedBareIfEmpty => "=?",
                _ => "=",
            });
        }
        _ => {}
    }

    if lead.is_empty() {
        "(.+)?".to_string()
    } else {
        format!("(?:{lead}(.*))?")
    }
}
