//! Fluent rule declaration.
//!
//! `when(...)` hands out a [`RuleBuilder`] bound to the freshly registered
//! rule. The builder exposes exactly the legal next steps: add more
//! conditions with `and`, or finish the rule by attaching an action. The
//! finishing methods consume the builder, so a completed rule cannot be
//! extended afterwards.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use http::StatusCode;

use crate::content::response;
use crate::error::Result;
use crate::matchers::{self, Matcher};
use crate::rules::rule::{Action, Rule};
use crate::{MockRequest, MockResponse};

/// Handle for finishing the declaration of one rule.
#[must_use = "a rule without an action never matches; finish it with `then`"]
pub struct RuleBuilder {
    rule: Arc<Rule>,
}

impl RuleBuilder {
    pub(crate) fn new(rule: Arc<Rule>) -> Self {
        Self { rule }
    }

    /// Add another condition; all conditions must hold for the rule to
    /// match.
    pub fn and(self, condition: impl Matcher + 'static) -> Self {
        self.rule.push_condition(Box::new(condition));
        self
    }

    /// Add a url pattern condition, compiled eagerly.
    pub fn and_url(self, pattern: &str) -> Result<Self> {
        let condition = matchers::url_pattern(pattern)?;
        Ok(self.and(condition))
    }

    /// Finish the rule with a synchronous response factory.
    pub fn then<F>(self, factory: F)
    where
        F: Fn(MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        let action: Action =
            Arc::new(move |request| std::future::ready(Ok(factory(request))).boxed());
        self.rule.set_action(action);
    }

    /// Finish the rule with a fixed status and an empty body.
    pub fn then_status(self, status: StatusCode) {
        self.then(move |_request| response(status));
    }

    /// Finish the rule with an asynchronous, fallible response factory.
    pub fn respond_with<F, Fut>(self, factory: F)
    where
        F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<MockResponse>> + Send + 'static,
    {
        let action: Action = Arc::new(move |request| factory(request).boxed());
        self.rule.set_action(action);
    }
}

impl std::fmt::Debug for RuleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBuilder").field("rule", &self.rule).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ResponseExt;
    use crate::rules::RuleEngine;
    use bytes::Bytes;
    use http::Method;

    fn get(uri: &str) -> MockRequest {
        http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn chained_conditions_all_apply() {
        let engine = RuleEngine::new();
        engine
            .when(matchers::method(Method::GET))
            .and_url("/widget/*")
            .unwrap()
            .then_status(StatusCode::OK);

        let ok = engine.dispatch(get("/widget/1")).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let wrong_path = engine.dispatch(get("/gadget/1")).await.unwrap();
        assert_eq!(wrong_path.status(), StatusCode::NOT_FOUND);

        let wrong_method = http::Request::builder()
            .method(Method::DELETE)
            .uri("/widget/1")
            .body(Bytes::new())
            .unwrap();
        let response = engine.dispatch(wrong_method).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn sync_factory_sees_the_request() {
        let engine = RuleEngine::new();
        engine.when_url("*").unwrap().then(|request| {
            response(StatusCode::OK)
                .with_header("x-echo-path", request.uri().path())
                .expect("path is a valid header value")
        });

        let reply = engine.dispatch(get("/echo/me")).await.unwrap();
        assert_eq!(reply.headers().get("x-echo-path").unwrap(), "/echo/me");
    }

    #[tokio::test]
    async fn async_factory_errors_propagate() {
        let engine = RuleEngine::new();
        engine
            .when_url("*")
            .unwrap()
            .respond_with(|_request| async { Err(crate::Error::MissingContent) });

        assert!(engine.dispatch(get("/x")).await.is_err());
    }
}
