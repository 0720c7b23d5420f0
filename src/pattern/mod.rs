//! Fuzzy url matching.
//!
//! # Data Flow
//! ```text
//! Pattern string ("http://*.local/api?key=*")
//!     → url.rs (split into scheme / host / path / query parts)
//!     → wildcard.rs (compile each part to an anchored matcher)
//!     → Freeze as immutable UrlPattern
//!
//! Request uri
//!     → url.rs (component checks + query multimap consumption)
//!     → bool
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once at rule declaration, immutable afterwards
//! - Scheme/host/path match case-insensitively; query keys and values do not
//! - Query value assignment is greedy in declaration order, not a full
//!   bipartite search; ambiguous overlapping wildcards are a caller problem

pub mod url;
pub mod wildcard;

pub use self::url::UrlPattern;
