//! Request body matching and response construction helpers.
//!
//! # Responsibilities
//! - Compare request bodies against strings, JSON values, or raw bytes
//! - Build synthetic responses: status, headers, string/JSON bodies
//!
//! # Design Decisions
//! - Bodies are fully buffered `Bytes`, so matchers can inspect them as
//!   often as resolution needs to
//! - An empty body counts as "no content"; the `required()` variants turn
//!   that into an error instead of a non-match

pub mod body;
pub mod response;

pub use body::{body_bytes, body_json, body_json_matches, body_string, read_json};
pub use response::{response, ResponseExt};
