//! Request condition matchers.
//!
//! # Responsibilities
//! - Define the [`Matcher`] trait every rule condition implements
//! - Provide the common conditions: method, url pattern, exact url, header
//!
//! # Design Decisions
//! - One struct per condition; rules combine them with AND semantics
//! - `matches` is fallible so content conditions can demand a body and
//!   have the failure surface through dispatch instead of being swallowed
//! - Plain `Fn(&MockRequest) -> bool` closures work as matchers directly

use http::header::{HeaderName, HeaderValue};
use http::{Method, Uri};

use crate::error::Result;
use crate::pattern::UrlPattern;
use crate::MockRequest;

/// A condition over an incoming request.
pub trait Matcher: Send + Sync {
    /// Returns whether the request satisfies this condition.
    ///
    /// Errors abort rule resolution and propagate to the dispatch caller.
    fn matches(&self, request: &MockRequest) -> Result<bool>;
}

impl<F> Matcher for F
where
    F: Fn(&MockRequest) -> bool + Send + Sync,
{
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        Ok(self(request))
    }
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl Matcher for MethodMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        Ok(request.method() == self.method)
    }
}

/// Matches requests whose method equals `method`.
pub fn method(method: Method) -> MethodMatcher {
    MethodMatcher { method }
}

/// Matches the request target against a compiled [`UrlPattern`].
#[derive(Debug, Clone)]
pub struct UrlPatternMatcher {
    pattern: UrlPattern,
}

impl Matcher for UrlPatternMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        Ok(self.pattern.matches(request.uri()))
    }
}

/// Matches requests whose url satisfies the wildcard pattern.
///
/// The pattern is compiled eagerly so a malformed string fails at rule
/// declaration time, not at dispatch time.
pub fn url_pattern(pattern: &str) -> Result<UrlPatternMatcher> {
    Ok(UrlPatternMatcher {
        pattern: UrlPattern::compile(pattern)?,
    })
}

/// Matches the request target exactly.
///
/// Absolute targets compare the whole uri; relative targets compare only
/// path and query.
#[derive(Debug, Clone)]
pub struct ExactUrlMatcher {
    target: Uri,
}

impl Matcher for ExactUrlMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        if self.target.scheme().is_some() {
            return Ok(request.uri() == &self.target);
        }
        Ok(request.uri().path_and_query().map(|pq| pq.as_str())
            == self.target.path_and_query().map(|pq| pq.as_str()))
    }
}

/// Matches requests whose url equals `target` exactly.
pub fn exact_uri(target: Uri) -> ExactUrlMatcher {
    ExactUrlMatcher { target }
}

/// Matches requests whose url equals the given string exactly.
pub fn exact_url(target: &str) -> Result<ExactUrlMatcher> {
    Ok(exact_uri(target.parse::<Uri>()?))
}

/// Matches on header presence, optionally requiring a specific value.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    name: HeaderName,
    value: Option<HeaderValue>,
}

impl Matcher for HeaderMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        let mut values = request.headers().get_all(&self.name).iter();
        match &self.value {
            None => Ok(values.next().is_some()),
            Some(expected) => Ok(values.any(|v| v == expected)),
        }
    }
}

/// Matches requests carrying the named header, with any value.
pub fn header(name: &str) -> Result<HeaderMatcher> {
    Ok(HeaderMatcher {
        name: name.parse::<HeaderName>()?,
        value: None,
    })
}

/// Matches requests carrying the named header with the given value.
pub fn header_value(name: &str, value: &str) -> Result<HeaderMatcher> {
    Ok(HeaderMatcher {
        name: name.parse::<HeaderName>()?,
        value: Some(value.parse::<HeaderValue>()?),
    })
}
