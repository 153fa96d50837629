//! # uritemplate
//!
//! RFC 6570 URI Templates: expand `{...}` expressions against a set of
//! variables, and for simple enough templates, extract the variables back out
//! of a concrete URI.
//!
//! ```text
//! let template = Template::new("https://api.github.com/repos/{owner}/{repo}/");
//! template.expand(&vars)          // "https://api.github.com/repos/kylef/PathKit/"
//! template.extract(uri)           // Some({"owner": "kylef", "repo": "PathKit"})
//! ```
//!
//! All the machinery lives in the [uritemplate] module; the commonly used types
//! are re-exported here.

pub mod uritemplate;

pub use uritemplate::error::{BindingsError, PatternError};
pub use uritemplate::level::{Level, SUPPORTED_EXPANSION_LEVEL, SUPPORTED_EXTRACTION_LEVEL};
pub use uritemplate::template::Template;
pub use uritemplate::value::{Value, Variables};
