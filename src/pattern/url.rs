//! Compiled url patterns.
//!
//! A pattern string is parsed left-to-right, each recognized component
//! consuming a prefix of the remainder:
//!
//! - `scheme://` starts an absolute pattern (`http://host/path?query`)
//! - `//` starts a scheme-relative pattern (`//host/path`)
//! - `/` starts a path-only pattern (`/my/resource`)
//! - `?` starts a query-only pattern (`?key=value`)
//!
//! Every component is a wildcard matcher; omitted components accept
//! anything. The empty pattern and `*` accept every request.

use http::Uri;
use percent_encoding::percent_decode_str;

use crate::error::{Error, Result};
use crate::pattern::wildcard::Wildcard;

/// Compiled fuzzy matcher for one url-shaped pattern string.
#[derive(Debug, Clone, Default)]
pub struct UrlPattern {
    scheme: Option<Wildcard>,
    host: Option<Wildcard>,
    path: Option<Wildcard>,
    /// Required query values grouped by key, in declaration order.
    query: Vec<(String, Vec<Wildcard>)>,
}

impl UrlPattern {
    /// Compile a pattern string.
    ///
    /// Fails with [`Error::InvalidPattern`] when the string is non-empty,
    /// not `*`, and none of the recognized component prefixes are present.
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.is_empty() || pattern == "*" {
            return Ok(Self::default());
        }

        let mut compiled = Self::default();
        let mut rest = pattern;
        let mut parsed = false;

        // Absolute url: everything before '://' is the scheme; consume
        // through the ':' so the host step sees the leading '//'.
        if let Some(scheme_end) = rest.find("://") {
            compiled.scheme = Some(Wildcard::new_ignore_case(&rest[..scheme_end]));
            rest = &rest[scheme_end + 1..];
            parsed = true;
        }

        // Scheme-relative: host runs to the next '/' or the end.
        if let Some(after) = rest.strip_prefix("//") {
            let host_end = after.find('/').unwrap_or(after.len());
            compiled.host = Some(Wildcard::new_ignore_case(&after[..host_end]));
            rest = &after[host_end..];
            parsed = true;
        }

        // Path: runs to the query string or the end. The trailing '/' is
        // trimmed and the matcher re-accepts it, so '/a/b' and '/a/b/'
        // are equivalent on both the pattern and the request side.
        if rest.starts_with('/') {
            let path_end = rest.find('?').unwrap_or(rest.len());
            compiled.path = Some(Wildcard::new_path(rest[..path_end].trim_end_matches('/')));
            rest = &rest[path_end..];
            parsed = true;
        }

        // Query string: '&'-separated key=value pairs, grouped by key.
        if rest.starts_with('?') {
            for (key, value) in parse_query(rest) {
                let matcher = Wildcard::new(&value);
                match compiled.query.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, group)) => group.push(matcher),
                    None => compiled.query.push((key, vec![matcher])),
                }
            }
            parsed = true;
        }

        if !parsed {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
            });
        }
        Ok(compiled)
    }

    /// Test a request target against the pattern.
    pub fn matches(&self, uri: &Uri) -> bool {
        if !component_matches(&self.scheme, uri.scheme_str())
            || !component_matches(&self.host, uri.host())
            || !self.path.as_ref().map_or(true, |p| p.is_match(uri.path()))
        {
            return false;
        }

        let actual = parse_query(uri.query().unwrap_or(""));
        for (key, required) in &self.query {
            // The request must carry the key at all.
            let mut available: Vec<&str> = actual
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .collect();
            if available.is_empty() {
                return false;
            }

            // Each required value claims one actual value, greedily in
            // declaration order; a claimed value cannot satisfy a second
            // requirement. Unclaimed extras are ignored.
            for matcher in required {
                match available.iter().position(|v| matcher.is_match(v)) {
                    Some(index) => {
                        available.remove(index);
                    }
                    None => return false,
                }
            }
        }
        true
    }
}

fn component_matches(matcher: &Option<Wildcard>, component: Option<&str>) -> bool {
    match (matcher, component) {
        (None, _) => true,
        (Some(w), Some(value)) => w.is_match(value),
        (Some(_), None) => false,
    }
}

/// Split a query string into percent-decoded key/value pairs, preserving
/// order and duplicates. A leading '?' is ignored; a pair without '=' gets
/// an empty value. Unlike form decoding, '+' stays a literal plus.
fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.trim_start_matches('?');
    if query.trim().is_empty() {
        return Vec::new();
    }
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
