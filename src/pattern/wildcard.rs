//! Wildcard string matching.
//!
//! A wildcard pattern is a literal string where `*` means "any run of
//! characters" and `?` means "any single character". Patterns compile to
//! anchored regexes so a match always covers the full input.

use regex::{Regex, RegexBuilder};

/// A compiled wildcard matcher over a single string.
#[derive(Debug, Clone)]
pub struct Wildcard {
    regex: Regex,
}

impl Wildcard {
    /// Compile a case-sensitive wildcard pattern.
    pub fn new(pattern: &str) -> Self {
        Self::build(pattern, "", false)
    }

    /// Compile a case-insensitive wildcard pattern.
    pub fn new_ignore_case(pattern: &str) -> Self {
        Self::build(pattern, "", true)
    }

    /// Compile a case-insensitive wildcard pattern that also accepts an
    /// optional trailing `/` on the input.
    pub fn new_path(pattern: &str) -> Self {
        Self::build(pattern, "/?", true)
    }

    fn build(pattern: &str, suffix: &str, ignore_case: bool) -> Self {
        let escaped = regex::escape(pattern)
            .replace(r"\*", ".*")
            .replace(r"\?", ".");
        let regex = RegexBuilder::new(&format!("^{escaped}{suffix}$"))
            .case_insensitive(ignore_case)
            .build()
            .expect("escaped wildcard is always a valid regex");
        Self { regex }
    }

    /// Test the full input string against the compiled pattern.
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}
