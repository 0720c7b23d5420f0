//! Client façade embedding the rule engine as its transport.
//!
//! # Responsibilities
//! - Expose the `when(...).then(...)` declaration surface
//! - Resolve relative request targets against an optional base url
//! - Record every request into the history log before dispatch
//!
//! # Design Decisions
//! - Cheap to clone; clones share the engine and history, so an action
//!   can capture a clone and register follow-up rules during dispatch
//! - No network, ever: `send` is a pure in-process call

pub mod history;

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Uri};
use url::Url;

use crate::error::Result;
use crate::matchers::Matcher;
use crate::rules::engine::FallbackResponder;
use crate::rules::{RuleBuilder, RuleEngine};
use crate::{MockRequest, MockResponse};

use history::{RecordedRequest, RequestHistory};

/// An HTTP-client-shaped object answering every request from its rule
/// engine.
#[derive(Debug, Clone)]
pub struct MockClient {
    engine: Arc<RuleEngine>,
    history: Arc<RequestHistory>,
    base_url: Option<Url>,
}

impl MockClient {
    /// Create a client whose unmatched requests answer `404 Not Found`.
    pub fn new() -> Self {
        Self::with_engine(RuleEngine::new())
    }

    /// Create a client with a custom no-match responder.
    pub fn with_fallback(fallback: FallbackResponder) -> Self {
        Self::with_engine(RuleEngine::with_fallback(fallback))
    }

    fn with_engine(engine: RuleEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            history: Arc::new(RequestHistory::new()),
            base_url: None,
        }
    }

    /// Set the base url used to absolutize relative request targets.
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        self.base_url = Some(Url::parse(base)?);
        Ok(self)
    }

    /// Access the underlying rule engine.
    pub fn engine(&self) -> &Arc<RuleEngine> {
        &self.engine
    }

    /// Start a new rule with its first condition.
    pub fn when(&self, condition: impl Matcher + 'static) -> RuleBuilder {
        self.engine.when(condition)
    }

    /// Start a new rule matching the given url pattern.
    pub fn when_url(&self, pattern: &str) -> Result<RuleBuilder> {
        self.engine.when_url(pattern)
    }

    /// Dispatch a request against the rule set.
    pub async fn send(&self, request: MockRequest) -> Result<MockResponse> {
        let request = self.absolutize(request)?;
        self.history.record(&request);
        self.engine.dispatch(request).await
    }

    /// Convenience GET with an empty body.
    pub async fn get(&self, url: &str) -> Result<MockResponse> {
        self.send(build_request(Method::GET, url, Bytes::new())?).await
    }

    /// Convenience POST with a raw body.
    pub async fn post(&self, url: &str, body: impl Into<Bytes>) -> Result<MockResponse> {
        self.send(build_request(Method::POST, url, body.into())?).await
    }

    /// Convenience PUT with a raw body.
    pub async fn put(&self, url: &str, body: impl Into<Bytes>) -> Result<MockResponse> {
        self.send(build_request(Method::PUT, url, body.into())?).await
    }

    /// Snapshot of every request seen so far, oldest first.
    pub fn request_history(&self) -> Vec<RecordedRequest> {
        self.history.snapshot()
    }

    /// Rewrite a relative target as absolute when a base url is set.
    fn absolutize(&self, request: MockRequest) -> Result<MockRequest> {
        let Some(base) = &self.base_url else {
            return Ok(request);
        };
        if request.uri().scheme().is_some() {
            return Ok(request);
        }

        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let resolved = base.join(target)?;
        let uri = resolved.as_str().parse::<Uri>()?;

        let (mut parts, body) = request.into_parts();
        parts.uri = uri;
        Ok(MockRequest::from_parts(parts, body))
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_request(method: Method, url: &str, body: Bytes) -> Result<MockRequest> {
    Ok(http::Request::builder()
        .method(method)
        .uri(url.parse::<Uri>()?)
        .body(body)?)
}
