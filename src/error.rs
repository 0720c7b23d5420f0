//! Error definitions shared across the crate.

use thiserror::Error;

/// Errors raised while declaring rules or dispatching requests.
#[derive(Debug, Error)]
pub enum Error {
    /// A url pattern string recognized none of the url component prefixes.
    /// Raised at declaration time so a bad test setup fails fast.
    #[error(
        "url pattern '{pattern}' is not in a recognized format; start it with \
         'scheme://' for absolute urls, '//' for scheme-relative urls, '/' for \
         paths or '?' for query-only patterns"
    )]
    InvalidPattern { pattern: String },

    /// A condition required a request body, but the request carries none.
    #[error("condition requires request content but the request has no body")]
    MissingContent,

    /// A required JSON body could not be deserialized.
    #[error("request body is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    /// A url string could not be parsed into a request target.
    #[error("invalid uri: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),

    /// A header name was not a legal HTTP header name.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// A header value contained bytes not allowed in an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// A base url was relative or otherwise unusable for resolving targets.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A response could not be assembled from its parts.
    #[error("failed to build response: {0}")]
    Response(#[from] http::Error),
}

/// Result type for rule declaration and dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;
