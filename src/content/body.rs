//! Body content matchers.
//!
//! Each matcher comes in two flavors. The default treats an absent or
//! mismatched body as a plain non-match. Calling `required()` makes an
//! absent (or, for JSON, undecodable) body an error that propagates out of
//! dispatch, for conditions where missing content means the test itself is
//! wrong.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::matchers::Matcher;
use crate::MockRequest;

/// Matches a body that is exactly the given UTF-8 string.
#[derive(Debug, Clone)]
pub struct BodyStringMatcher {
    expected: String,
    required: bool,
}

impl BodyStringMatcher {
    /// Error on requests without a body instead of treating them as a
    /// non-match.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Matcher for BodyStringMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        match present(request, self.required)? {
            Some(body) => Ok(body == self.expected.as_bytes()),
            None => Ok(false),
        }
    }
}

/// Matches requests whose body is exactly `expected`.
pub fn body_string(expected: impl Into<String>) -> BodyStringMatcher {
    BodyStringMatcher {
        expected: expected.into(),
        required: false,
    }
}

/// Matches a JSON body equal to a serialized expected value.
#[derive(Debug, Clone)]
pub struct BodyJsonMatcher {
    expected: Value,
    required: bool,
}

impl BodyJsonMatcher {
    /// Error on requests without a decodable JSON body.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Matcher for BodyJsonMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        let Some(body) = present(request, self.required)? else {
            return Ok(false);
        };
        match serde_json::from_slice::<Value>(body) {
            Ok(actual) => Ok(actual == self.expected),
            Err(e) if self.required => Err(Error::Json(e)),
            Err(_) => Ok(false),
        }
    }
}

/// Matches requests whose JSON body equals `expected` once both sides are
/// in value form.
pub fn body_json<T: Serialize>(expected: &T) -> Result<BodyJsonMatcher> {
    Ok(BodyJsonMatcher {
        expected: serde_json::to_value(expected)?,
        required: false,
    })
}

/// Matches a JSON body deserialized as `T` against a predicate.
pub struct BodyJsonPredicateMatcher<T, F> {
    predicate: F,
    required: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> BodyJsonPredicateMatcher<T, F> {
    /// Error on requests without a decodable JSON body.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl<T, F> Matcher for BodyJsonPredicateMatcher<T, F>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        let Some(body) = present(request, self.required)? else {
            return Ok(false);
        };
        match serde_json::from_slice::<T>(body) {
            Ok(value) => Ok((self.predicate)(&value)),
            Err(e) if self.required => Err(Error::Json(e)),
            Err(_) => Ok(false),
        }
    }
}

/// Matches requests whose JSON body deserializes as `T` and satisfies
/// `predicate`.
pub fn body_json_matches<T, F>(predicate: F) -> BodyJsonPredicateMatcher<T, F>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool + Send + Sync,
{
    BodyJsonPredicateMatcher {
        predicate,
        required: false,
        _marker: PhantomData,
    }
}

/// Matches a body that is exactly the given byte sequence.
#[derive(Debug, Clone)]
pub struct BodyBytesMatcher {
    expected: Vec<u8>,
    required: bool,
}

impl BodyBytesMatcher {
    /// Error on requests without a body.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Matcher for BodyBytesMatcher {
    fn matches(&self, request: &MockRequest) -> Result<bool> {
        match present(request, self.required)? {
            Some(body) => Ok(body == self.expected.as_slice()),
            None => Ok(false),
        }
    }
}

/// Matches requests whose body is exactly `expected`, length included.
pub fn body_bytes(expected: impl Into<Vec<u8>>) -> BodyBytesMatcher {
    BodyBytesMatcher {
        expected: expected.into(),
        required: false,
    }
}

/// Deserialize a buffered body as JSON.
pub fn read_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

fn present(request: &MockRequest, required: bool) -> Result<Option<&[u8]>> {
    if request.body().is_empty() {
        if required {
            return Err(Error::MissingContent);
        }
        return Ok(None);
    }
    Ok(Some(request.body().as_ref()))
}
