//! Response construction helpers.
//!
//! Rule actions usually only need "this status with this body"; these
//! helpers keep that a one-liner while staying plain `http::Response`
//! values underneath.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::Serialize;

use crate::error::Result;
use crate::MockResponse;

/// Build an empty response with the given status.
pub fn response(status: StatusCode) -> MockResponse {
    let mut response = http::Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}

/// Builder-style additions on top of [`MockResponse`].
pub trait ResponseExt: Sized {
    /// Append a header, keeping any existing values for the same name.
    fn with_header(self, name: &str, value: &str) -> Result<Self>;

    /// Replace the body with a string and set the content type.
    fn with_body(self, body: impl Into<Bytes>, media_type: &str) -> Result<Self>;

    /// Replace the body with `text/plain` content.
    fn with_text_body(self, body: impl Into<String>) -> Result<Self> {
        self.with_body(Bytes::from(body.into()), "text/plain; charset=utf-8")
    }

    /// Replace the body with the value serialized as `application/json`.
    fn with_json_body<T: Serialize>(self, value: &T) -> Result<Self>;
}

impl ResponseExt for MockResponse {
    fn with_header(self, name: &str, value: &str) -> Result<Self> {
        let name = name.parse::<HeaderName>()?;
        let value = value.parse::<HeaderValue>()?;
        let mut response = self;
        response.headers_mut().append(name, value);
        Ok(response)
    }

    fn with_body(self, body: impl Into<Bytes>, media_type: &str) -> Result<Self> {
        let content_type = media_type.parse::<HeaderValue>()?;
        let mut response = self;
        *response.body_mut() = body.into();
        response.headers_mut().insert(CONTENT_TYPE, content_type);
        Ok(response)
    }

    fn with_json_body<T: Serialize>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        self.with_body(Bytes::from(body), "application/json")
    }
}
