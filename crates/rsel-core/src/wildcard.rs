//! `*` / `?` wildcard patterns.
//!
//! `*` matches any run of characters, `?` exactly one, everything else itself.
//! Matching always covers the whole subject.

use regex::Regex;
use wildmatch::WildMatch;

/// Translate a wildcard pattern into an anchored regular expression.
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

/// Compile a pattern fixed in the rule text.
pub fn compile_wildcard(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&wildcard_to_regex(pattern))
}

/// Match a pattern read from row data.
pub fn wildcard_matches(pattern: &str, subject: &str) -> bool {
    WildMatch::new(pattern).matches(subject)
}
