//! In-process HTTP mocking.
//!
//! Test code declares condition→response rules with a fluent
//! `when(...).then(...)` API; a dispatcher answers `http` requests from the
//! rule set without touching the network. The most recently declared
//! matching rule wins, so a test can override a generic stub with a more
//! specific one just by declaring it later.
//!
//! ```
//! use http::StatusCode;
//! use mockhttp::MockClient;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> mockhttp::Result<()> {
//! let client = MockClient::new();
//! client.when_url("/hello")?.then_status(StatusCode::OK);
//!
//! let response = client.get("http://service.local/hello").await?;
//! assert_eq!(response.status(), StatusCode::OK);
//!
//! let missed = client.get("http://service.local/other").await?;
//! assert_eq!(missed.status(), StatusCode::NOT_FOUND);
//! # Ok(())
//! # }
//! ```
//!
//! Url patterns are fuzzy: `*` matches any run of characters, `?` exactly
//! one, and a pattern may give any combination of scheme, host, path and
//! query requirements (see [`pattern::UrlPattern`]). Conditions beyond the
//! url live in [`matchers`] and [`content`], and rule actions may register
//! further rules mid-dispatch, which keeps stateful request/response
//! scripts like "PUT stores, later GET returns" straightforward.

pub mod client;
pub mod content;
pub mod error;
pub mod matchers;
pub mod pattern;
pub mod rules;

pub use client::history::{RecordedRequest, RequestHistory};
pub use client::MockClient;
pub use error::{Error, Result};
pub use pattern::UrlPattern;
pub use rules::{RuleBuilder, RuleEngine};

use bytes::Bytes;

/// A mocked request: a standard `http` request with a fully buffered body.
pub type MockRequest = http::Request<Bytes>;

/// A mocked response with a fully buffered body.
pub type MockResponse = http::Response<Bytes>;
