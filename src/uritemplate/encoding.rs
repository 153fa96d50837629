//! Percent-encoding helpers
//!
//! Two encoding policies are used during expansion:
//!
//! - [Encoding::Unreserved]: only `ALPHA / DIGIT / "-" / "." / "_" / "~"` pass
//!   through, everything else becomes `%XX`.
//! - [Encoding::Reserved]: the reserved set (`gen-delims` and `sub-delims`) also
//!   passes through, as do existing `%XX` triplets.
//!
//! Non-ASCII characters are always encoded as the `%XX` form of their UTF-8 bytes.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters that are left alone under the unreserved-only policy.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved plus `gen-delims` (`:/?#[]@`) and `sub-delims` (`!$&'()*+,;=`).
const RESERVED: &AsciiSet = &UNRESERVED
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Which characters an operator allows through unescaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Percent-encode everything outside the unreserved set
    Unreserved,
    /// Allow unreserved and reserved characters, keep `%XX` triplets
    Reserved,
}

/// Encode `input` under the given policy.
pub fn encode(input: &str, policy: Encoding) -> String {
    match policy {
        Encoding::Unreserved => utf8_percent_encode(input, UNRESERVED).to_string(),
        Encoding::Reserved => encode_reserved(input),
    }
}

/// Decode `%XX` sequences. Invalid UTF-8 after decoding is replaced with U+FFFD.
pub fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

fn encode_reserved(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], RESERVED));
        let tail = &rest[pos..];
        if is_pct_triplet(tail) {
            out.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            out.push_str("%25");
            rest = &tail[1..];
        }
    }
    out.extend(utf8_percent_encode(rest, RESERVED));

    out
}

/// `true` if `s` starts with `%` followed by two hex digits.
fn is_pct_triplet(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3
        && bytes[0] == b'%'
        && bytes[1].is_ascii_hexdigit()
        && bytes[2].is_ascii_hexdigit()
}
