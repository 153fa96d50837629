//! Variable specifier parsing
//!
//! An expression body (operator character already removed) is a comma separated
//! list of variable specifiers:
//!
//! ```text
//! name        plain variable
//! name*       explode modifier
//! name:N      prefix modifier, N a decimal integer
//! ```
//!
//! A specifier carries at most one modifier. `name:3*` is read as an exploded
//! variable called `name:3`, and a `:` suffix that isn't a decimal integer stays
//! part of the name.

use tracing::trace;

/// One parsed variable specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarSpec<'a> {
    pub name: &'a str,
    pub explode: bool,
    /// Maximum number of characters of a scalar value to expand
    pub prefix: Option<usize>,
}

impl<'a> VarSpec<'a> {
    /// Parse a single comma-free token
    pub fn parse(token: &'a str) -> Self {
        if let Some(name) = token.strip_suffix('*') {
            return Self {
                name,
                explode: true,
                prefix: None,
            };
        }

        if let Some((name, length)) = token.rsplit_once(':') {
            match parse_prefix_length(length) {
                Some(prefix) => {
                    return Self {
                        name,
                        explode: false,
                        prefix: Some(prefix),
                    }
                }
                None => trace!(token, "ignoring malformed prefix modifier"),
            }
        }

        Self {
            name: token,
            explode: false,
            prefix: None,
        }
    }

    pub fn has_modifier(&self) -> bool {
        self.explode || self.prefix.is_some()
    }
}

/// Decimal digits only; `usize::from_str` would also take a leading `+`.
fn parse_prefix_length(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse an expression body into its specifiers, in order.
pub fn parse_varspecs(body: &str) -> Vec<VarSpec<'_>> {
    body.split(',').map(VarSpec::parse).collect()
}
