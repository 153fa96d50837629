//! Expression scanner
//!
//! Splits a template into alternating literal runs and `{...}` expressions in a
//! single left-to-right pass. The first `}` after a `{` closes the expression, so
//! braces don't nest. Anything that doesn't form a complete, non-empty expression
//! (an unterminated `{`, or `{}`) is passed through as literal text.

/// One piece of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim into the expansion
    Literal(&'a str),
    /// The body of a `{...}` expression, braces stripped
    Expression(&'a str),
}

/// Iterator over the [Segment]s of a template
///
/// A clone continues from the same position. Scanning again from the start
/// takes a fresh [Scanner::new].
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(template: &'a str) -> Self {
        Self { rest: template }
    }

    /// Iterate only over expression bodies
    pub fn expressions(self) -> impl Iterator<Item = &'a str> {
        self.filter_map(|segment| match segment {
            Segment::Expression(body) => Some(body),
            Segment::Literal(_) => None,
        })
    }

    fn take_literal(&mut self, len: usize) -> Segment<'a> {
        let (literal, rest) = self.rest.split_at(len);
        self.rest = rest;
        Segment::Literal(literal)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some(after_open) = self.rest.strip_prefix('{') {
            return Some(match after_open.find('}') {
                // `{}` is not an expression
                Some(0) => self.take_literal(2),
                Some(end) => {
                    let body = &after_open[..end];
                    self.rest = &after_open[end + 1..];
                    Segment::Expression(body)
                }
                None => self.take_literal(self.rest.len()),
            });
        }

        // Literal run up to the next `{` (which is never at position 0 here)
        let len = self.rest.find('{').unwrap_or(self.rest.len());
        Some(self.take_literal(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Segment::{Expression, Literal};

    fn scan(template: &str) -> Vec<Segment<'_>> {
        Scanner::new(template).collect()
    }

    #[test]
    fn test_empty_template() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(scan("https://example.com/"), vec![Literal("https://example.com/")]);
    }

    #[test]
    fn test_alternating_segments() {
        assert_eq!(
            scan("{scheme}://{hostname}/"),
            vec![
                Expression("scheme"),
                Literal("://"),
                Expression("hostname"),
                Literal("/"),
            ]
        );
    }

    #[test]
    fn test_adjacent_expressions() {
        assert_eq!(
            scan("{a}{+b}"),
            vec![Expression("a"), Expression("+b")]
        );
    }

    #[test]
    fn test_first_close_brace_terminates() {
        assert_eq!(
            scan("x{a{b}c}"),
            vec![Literal("x"), Expression("a{b"), Literal("c}")]
        );
    }

    #[test]
    fn test_unterminated_expression_is_literal() {
        assert_eq!(scan("/path/{open"), vec![Literal("/path/"), Literal("{open")]);
    }

    #[test]
    fn test_empty_braces_are_literal() {
        assert_eq!(
            scan("a{}b{c}"),
            vec![Literal("a"), Literal("{}"), Literal("b"), Expression("c")]
        );
    }

    #[test]
    fn test_stray_close_brace_is_literal() {
        assert_eq!(scan("a}b"), vec![Literal("a}b")]);
    }

    #[test]
    fn test_expressions_only() {
        let bodies: Vec<_> = Scanner::new("test/{a,b}/{?q}").expressions().collect();
        assert_eq!(bodies, vec!["a,b", "?q"]);
    }

    #[test]
    fn test_multibyte_literals() {
        assert_eq!(
            scan("ü/{x}/é"),
            vec![Literal("ü/"), Expression("x"), Literal("/é")]
        );
    }
}
