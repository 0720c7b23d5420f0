//! Ordered rule registry and request dispatch.

use std::sync::{Arc, RwLock};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use http::StatusCode;

use crate::content::response;
use crate::error::Result;
use crate::matchers::{self, Matcher};
use crate::rules::builder::RuleBuilder;
use crate::rules::rule::{Action, Rule};
use crate::{MockRequest, MockResponse};

/// The responder used when no rule matches a request.
pub type FallbackResponder =
    Arc<dyn Fn(MockRequest) -> BoxFuture<'static, Result<MockResponse>> + Send + Sync>;

/// Ordered registry of rules with thread-safe registration and
/// newest-first resolution.
///
/// Registration and resolution use independent short critical sections:
/// `when` holds the write lock only to push, `resolve` holds the read lock
/// only to scan. Neither is held while an action runs, so actions are free
/// to register follow-up rules from inside dispatch.
pub struct RuleEngine {
    rules: RwLock<Vec<Arc<Rule>>>,
    fallback: FallbackResponder,
}

impl RuleEngine {
    /// Create an engine whose fallback answers `404 Not Found`.
    pub fn new() -> Self {
        Self::with_fallback(Arc::new(|_req| {
            std::future::ready(Ok(response(StatusCode::NOT_FOUND))).boxed()
        }))
    }

    /// Create an engine with a custom no-match responder.
    pub fn with_fallback(fallback: FallbackResponder) -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
            fallback,
        }
    }

    /// Start a new rule with its first condition.
    ///
    /// The rule is pushed on top of the resolution order immediately but
    /// stays ineligible until the returned builder attaches an action.
    pub fn when(&self, condition: impl Matcher + 'static) -> RuleBuilder {
        let rule = Arc::new(Rule::new(Box::new(condition)));
        let total = {
            let mut rules = self.rules.write().expect("rule list lock poisoned");
            rules.push(Arc::clone(&rule));
            rules.len()
        };
        tracing::debug!(total, "rule registered");
        RuleBuilder::new(rule)
    }

    /// Start a new rule matching the given url pattern.
    ///
    /// The pattern is compiled before anything is registered, so a bad
    /// pattern fails the declaration and leaves the engine untouched.
    pub fn when_url(&self, pattern: &str) -> Result<RuleBuilder> {
        let condition = matchers::url_pattern(pattern)?;
        Ok(self.when(condition))
    }

    /// Find the newest complete rule whose condition accepts the request.
    ///
    /// The read lock is released before this returns, so the caller can
    /// run the rule's action without holding up registration.
    pub fn resolve(&self, request: &MockRequest) -> Result<Option<Arc<Rule>>> {
        let rules = self.rules.read().expect("rule list lock poisoned");
        for rule in rules.iter().rev() {
            if rule.try_match(request)? {
                return Ok(Some(Arc::clone(rule)));
            }
        }
        Ok(None)
    }

    /// Answer a request from the rule set, or from the fallback when
    /// nothing matches.
    pub async fn dispatch(&self, request: MockRequest) -> Result<MockResponse> {
        let method = request.method().clone();
        let uri = request.uri().clone();

        let action: Action = match self.resolve(&request)? {
            Some(rule) => {
                tracing::debug!(method = %method, uri = %uri, "rule matched");
                rule.action()
                    .expect("resolved rule is complete by construction")
            }
            None => {
                tracing::debug!(method = %method, uri = %uri, "no rule matched, using fallback");
                Arc::clone(&self.fallback)
            }
        };

        // The rule list lock is already released here; the action may call
        // back into `when` freely.
        action(request).await
    }

    /// Number of registered rules, complete or not.
    pub fn len(&self) -> usize {
        self.rules.read().expect("rule list lock poisoned").len()
    }

    /// True when no rules have been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.len())
            .finish()
    }
}
