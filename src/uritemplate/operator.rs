//! Operator registry and expansion rules
//!
//! RFC 6570 defines eight expression operators. They differ only in a handful of
//! data points (the table in section 3 / appendix A of the RFC), so each one is a
//! plain [Operator] record and a single set of expansion functions reads those
//! fields.
//!
//! | operator | trigger | prefix | joiner | encoding   | named             |
//! |----------|---------|--------|--------|------------|-------------------|
//! | simple   |         |        | `,`    | unreserved | no                |
//! | reserved | `+`     |        | `,`    | reserved   | no                |
//! | fragment | `#`     | `#`    | `,`    | reserved   | no                |
//! | label    | `.`     | `.`    | `.`    | unreserved | no                |
//! | path     | `/`     | `/`    | `/`    | unreserved | no                |
//! | param    | `;`     | `;`    | `;`    | unreserved | yes, bare if empty|
//! | query    | `?`     | `?`    | `&`    | unreserved | yes               |
//! | continue | `&`     | `&`    | `&`    | unreserved | yes               |

use super::encoding::{encode, Encoding};
use super::value::{Value, Variables};
use super::varspec::{parse_varspecs, VarSpec};

/// Which operator an [Operator] record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    FormQuery,
    FormContinuation,
}

/// Whether expanded values are emitted as `name=value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Naming {
    /// Values only
    Unnamed,
    /// Always `name=value`, `name=` for an empty value
    Named,
    /// `name=value`, but just `name` for an empty value
    NamedBareIfEmpty,
}

impl Naming {
    pub fn is_named(self) -> bool {
        !matches!(self, Naming::Unnamed)
    }
}

/// Behavior of one expression operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator {
    pub kind: OperatorKind,
    /// Leading expression character selecting this operator
    pub trigger: Option<char>,
    /// Emitted once before the expansion, if the expansion is non-empty
    pub prefix: &'static str,
    /// Between variables, and between exploded members
    pub joiner: &'static str,
    pub encoding: Encoding,
    pub naming: Naming,
    /// Treat empty lists and maps as undefined
    pub suppress_empty: bool,
}

pub const SIMPLE: Operator = Operator {
    kind: OperatorKind::Simple,
    trigger: None,
    prefix: "",
    joiner: ",",
    encoding: Encoding::Unreserved,
    naming: Naming::Unnamed,
    suppress_empty: false,
};

/// Every operator, the default one first.
pub static OPERATORS: [Operator; 8] = [
    SIMPLE,
    Operator {
        kind: OperatorKind::Reserved,
        trigger: Some('+'),
        prefix: "",
        joiner: ",",
        encoding: Encoding::Reserved,
        naming: Naming::Unnamed,
        suppress_empty: false,
    },
    Operator {
        kind: OperatorKind::Fragment,
        trigger: Some('#'),
        prefix: "#",
        joiner: ",",
        encoding: Encoding::Reserved,
        naming: Naming::Unnamed,
        suppress_empty: false,
    },
    Operator {
        kind: OperatorKind::Label,
        trigger: Some('.'),
        prefix: ".",
        joiner: ".",
        encoding: Encoding::Unreserved,
        naming: Naming::Unnamed,
        suppress_empty: true,
    },
    Operator {
        kind: OperatorKind::PathSegment,
        trigger: Some('/'),
        prefix: "/",
        joiner: "/",
        encoding: Encoding::Unreserved,
        naming: Naming::Unnamed,
        suppress_empty: true,
    },
    Operator {
        kind: OperatorKind::PathParameter,
        trigger: Some(';'),
        prefix: ";",
        joiner: ";",
        encoding: Encoding::Unreserved,
        naming: Naming::NamedBareIfEmpty,
        suppress_empty: false,
    },
    Operator {
        kind: OperatorKind::FormQuery,
        trigger: Some('?'),
        prefix: "?",
        joiner: "&",
        encoding: Encoding::Unreserved,
        naming: Naming::Named,
        suppress_empty: true,
    },
    Operator {
        kind: OperatorKind::FormContinuation,
        trigger: Some('&'),
        prefix: "&",
        joiner: "&",
        encoding: Encoding::Unreserved,
        naming: Naming::Named,
        suppress_empty: false,
    },
];

impl Operator {
    /// Pick the operator for an expression body and return the remaining body.
    ///
    /// A body that doesn't start with a trigger character uses [SIMPLE] and is
    /// returned unchanged.
    pub fn select(body: &str) -> (&'static Operator, &str) {
        let Some(first) = body.chars().next() else {
            return (&OPERATORS[0], body);
        };

        OPERATORS
            .iter()
            .find(|op| op.trigger == Some(first))
            .map(|op| (op, &body[first.len_utf8()..]))
            .unwrap_or((&OPERATORS[0], body))
    }

    /// Expand one variable specifier, `None` if it produces no output.
    pub fn expand_varspec(&self, spec: &VarSpec<'_>, value: Option<&Value>) -> Option<String> {
        match value? {
            Value::Null => None,
            Value::Scalar(s) => Some(self.expand_scalar(spec, s)),
            Value::List(items) => self.expand_list(spec, items),
            Value::Map(pairs) => self.expand_map(spec, pairs),
        }
    }

    /// Expand a whole expression body (trigger character included).
    pub fn expand_expression<V>(body: &str, variables: &V) -> String
    where
        V: Variables + ?Sized,
    {
        let (op, body) = Operator::select(body);
        let parts: Vec<String> = parse_varspecs(body)
            .iter()
            .filter_map(|spec| op.expand_varspec(spec, variables.lookup(spec.name)))
            .collect();

        let joined = parts.join(op.joiner);
        if joined.is_empty() {
            joined
        } else {
            format!("{}{}", op.prefix, joined)
        }
    }

    fn expand_scalar(&self, spec: &VarSpec<'_>, value: &str) -> String {
        let truncated = match spec.prefix {
            Some(max) if !spec.explode => truncate_chars(value, max),
            _ => value,
        };
        self.named(spec.name, value, encode(truncated, self.encoding))
    }

    fn expand_list(&self, spec: &VarSpec<'_>, items: &[String]) -> Option<String> {
        if items.is_empty() && self.suppress_empty {
            return None;
        }

        if spec.explode {
            let members: Vec<String> = items
                .iter()
                .map(|item| self.wrap(spec.name, encode(item, self.encoding)))
                .collect();
            Some(members.join(self.joiner))
        } else {
            let joined = items
                .iter()
                .map(|item| encode(item, self.encoding))
                .collect::<Vec<_>>()
                .join(",");
            Some(self.wrap(spec.name, joined))
        }
    }

    fn expand_map(&self, spec: &VarSpec<'_>, pairs: &[(String, String)]) -> Option<String> {
        if pairs.is_empty() && self.suppress_empty {
            return None;
        }

        let encoded = pairs
            .iter()
            .map(|(k, v)| (encode(k, self.encoding), encode(v, self.encoding)));

        if spec.explode {
            let members: Vec<String> = encoded.map(|(k, v)| format!("{k}={v}")).collect();
            Some(members.join(self.joiner))
        } else {
            let joined = encoded
                .map(|(k, v)| format!("{k},{v}"))
                .collect::<Vec<_>>()
                .join(",");
            Some(self.wrap(spec.name, joined))
        }
    }

    /// Apply the `name=value` rule to one encoded value. `;` drops the `=`
    /// only when the bound value itself is empty, not its truncated prefix.
    fn named(&self, name: &str, value: &str, encoded: String) -> String {
        match self.naming {
            Naming::Unnamed => encoded,
            Naming::NamedBareIfEmpty if value.is_empty() => name.to_string(),
            Naming::Named | Naming::NamedBareIfEmpty => format!("{name}={encoded}"),
        }
    }

    /// Composites and their exploded members are always wrapped as `name=...`
    /// by named operators, even when empty.
    fn wrap(&self, name: &str, joined: String) -> String {
        if self.naming.is_named() {
            format!("{name}={joined}")
        } else {
            joined
        }
    }
}

/// The first `max` characters of `value`.
fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}
