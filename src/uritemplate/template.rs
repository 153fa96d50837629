//! The [Template] type
//!
//! A `Template` is an immutable wrapper over the raw template string. Everything
//! else (segments, variable names, the extraction pattern) is derived from that
//! string on demand, and equality and hashing look at nothing but the raw text.

use super::encoding::decode;
use super::error::PatternError;
use super::extraction::ExtractionPattern;
use super::level::{Level, SUPPORTED_EXTRACTION_LEVEL};
use super::operator::Operator;
use super::scanner::{Scanner, Segment};
use super::value::Variables;
use super::varspec::parse_varspecs;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{debug, warn};

/// An RFC 6570 URI template
#[derive(Clone)]
pub struct Template {
    raw: String,
    /// Compiled on first extraction
    pattern: OnceCell<Result<ExtractionPattern, PatternError>>,
}

impl Template {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            raw: template.into(),
            pattern: OnceCell::new(),
        }
    }

    /// The template exactly as it was given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Literal and expression segments, left to right
    pub fn segments(&self) -> Scanner<'_> {
        Scanner::new(&self.raw)
    }

    /// Every variable name in the template, in order of appearance.
    ///
    /// Names repeat if the template uses them more than once; extraction
    /// relies on this list lining up with the expressions.
    pub fn variables(&self) -> Vec<&str> {
        self.segments()
            .expressions()
            .flat_map(|body| {
                let (_, body) = Operator::select(body);
                parse_varspecs(body).into_iter().map(|spec| spec.name)
            })
            .collect()
    }

    /// Expand the template with the given variables
    pub fn expand<V>(&self, variables: &V) -> String
    where
        V: Variables + ?Sized,
    {
        let mut expanded = String::with_capacity(self.raw.len());
        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => expanded.push_str(text),
                Segment::Expression(body) => {
                    expanded.push_str(&Operator::expand_expression(body, variables))
                }
            }
        }
        expanded
    }

    /// The RFC 6570 level this template needs
    pub fn level(&self) -> Level {
        self.segments()
            .expressions()
            .map(|body| {
                let (op, body) = Operator::select(body);
                Level::of_expression(op, &parse_varspecs(body))
            })
            .max()
            .unwrap_or(Level::One)
    }

    /// Whether [Template::extract] is reliable for this template
    pub fn supports_extraction(&self) -> bool {
        self.level() <= SUPPORTED_EXTRACTION_LEVEL
    }

    /// The compiled extraction pattern, built once and cached
    pub fn extraction_pattern(&self) -> Result<&ExtractionPattern, PatternError> {
        self.pattern
            .get_or_init(|| ExtractionPattern::compile(&self.raw))
            .as_ref()
            .map_err(|err| err.clone())
    }

    /// Extract variable values from a URI produced by this template.
    ///
    /// Returns `None` if the URI doesn't match. Captured values are
    /// percent-decoded; expressions that matched nothing leave their
    /// variable out of the result.
    ///
    /// Capture groups are paired with [Template::variables] by position and the
    /// pairing stops at the shorter of the two. A multi-variable expression
    /// yields a single group, so its whole captured text lands on its first
    /// variable and later names shift; see [Template::supports_extraction].
    ///
    /// A variable bound to `""` expands to nothing under the simple and most
    /// prefixed operators, so extracting that URI leaves it unbound rather
    /// than returning an empty string.
    pub fn extract(&self, uri: &str) -> Option<HashMap<String, String>> {
        let pattern = match self.extraction_pattern() {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(template = %self.raw, error = %err, "cannot extract");
                return None;
            }
        };

        let groups = pattern.captures(uri)?;
        let names = self.variables();
        if names.len() != groups.len() {
            debug!(
                template = %self.raw,
                variables = names.len(),
                groups = groups.len(),
                "variable and group counts differ, pairing by position"
            );
        }

        Some(
            names
                .into_iter()
                .zip(groups)
                .filter_map(|(name, group)| group.map(|text| (name.to_string(), decode(text))))
                .collect(),
        )
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&self.raw).finish()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Template {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for Template {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for Template {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

impl FromStr for Template {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
