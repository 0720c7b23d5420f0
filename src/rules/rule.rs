//! A single condition/action rule.

use std::sync::{Arc, RwLock};

use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::matchers::Matcher;
use crate::{MockRequest, MockResponse};

/// A response-producing action, shared so dispatch can run it after the
/// rule lock is released.
pub(crate) type Action =
    Arc<dyn Fn(MockRequest) -> BoxFuture<'static, Result<MockResponse>> + Send + Sync>;

/// One declarative routing entry: conditions combined with AND, plus the
/// action to run when they all hold.
///
/// A rule starts with its first condition and becomes eligible for
/// matching once an action is attached. Conditions are kept as a flat
/// list evaluated in declaration order with short-circuiting, so long
/// `and` chains cost a loop, not nested calls.
pub struct Rule {
    inner: RwLock<RuleInner>,
}

struct RuleInner {
    conditions: Vec<Box<dyn Matcher>>,
    action: Option<Action>,
}

impl Rule {
    pub(crate) fn new(condition: Box<dyn Matcher>) -> Self {
        Self {
            inner: RwLock::new(RuleInner {
                conditions: vec![condition],
                action: None,
            }),
        }
    }

    pub(crate) fn push_condition(&self, condition: Box<dyn Matcher>) {
        self.inner
            .write()
            .expect("rule lock poisoned")
            .conditions
            .push(condition);
    }

    /// Attach the action. Calling this again replaces the previous action.
    pub(crate) fn set_action(&self, action: Action) {
        self.inner.write().expect("rule lock poisoned").action = Some(action);
    }

    /// True once both a condition and an action are set.
    pub fn is_complete(&self) -> bool {
        let inner = self.inner.read().expect("rule lock poisoned");
        !inner.conditions.is_empty() && inner.action.is_some()
    }

    /// Evaluate the composed condition against a request.
    ///
    /// Only meaningful for complete rules; predicate errors propagate.
    pub fn evaluate(&self, request: &MockRequest) -> Result<bool> {
        let inner = self.inner.read().expect("rule lock poisoned");
        for condition in &inner.conditions {
            if !condition.matches(request)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Eligibility check used by resolution: complete and matching.
    pub(crate) fn try_match(&self, request: &MockRequest) -> Result<bool> {
        let inner = self.inner.read().expect("rule lock poisoned");
        if inner.action.is_none() {
            return Ok(false);
        }
        for condition in &inner.conditions {
            if !condition.matches(request)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Clone out the action so it can run without any lock held.
    pub(crate) fn action(&self) -> Option<Action> {
        self.inner.read().expect("rule lock poisoned").action.clone()
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("rule lock poisoned");
        f.debug_struct("Rule")
            .field("conditions", &inner.conditions.len())
            .field("complete", &inner.action.is_some())
            .finish()
    }
}
