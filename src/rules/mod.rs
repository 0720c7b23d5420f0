//! Rule storage and resolution.
//!
//! # Data Flow
//! ```text
//! Declaration:
//!     engine.when(condition)
//!         → push incomplete Rule (write lock, insertion only)
//!         → RuleBuilder.and(condition) / .then(action)
//!         → Rule becomes eligible
//!
//! Dispatch:
//!     engine.dispatch(request)
//!         → resolve: scan newest-first under read lock, clone match
//!         → release lock
//!         → run matched action (or fallback) unlocked
//! ```
//!
//! # Design Decisions
//! - Newest rule wins, so later declarations override earlier generic ones
//!   without a priority system
//! - No lock is ever held while user action code runs; actions may register
//!   further rules from inside dispatch without deadlocking
//! - Incomplete rules sit in the list but are never eligible

pub mod builder;
pub mod engine;
pub mod rule;

pub use builder::RuleBuilder;
pub use engine::RuleEngine;
pub use rule::Rule;
