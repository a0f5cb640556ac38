//! Error types for the Telegraph client core.
//!
//! # Design
//! `ShortNameError` is kept separate from `TelegraphError` so that callers
//! validating input locally never have to match on network failures.
//! Everything an operation can hit on its way through build -> transport ->
//! unwrap lands in `TelegraphError`, and the first failure wins.

use thiserror::Error;

use crate::http::TransportError;

/// Errors from constructing or decoding a `ShortName`.
#[derive(Debug, Error)]
pub enum ShortNameError {
    /// The value is empty or longer than 32 Unicode scalar values.
    #[error("short name must be 1-32 characters, got {count}")]
    Length { count: usize },

    /// The textual token is not a valid JSON string.
    #[error("short name is not a valid JSON string: {0}")]
    Format(#[source] serde_json::Error),
}

/// Errors returned by `TelegraphClient` build, parse and call methods.
#[derive(Debug, Error)]
pub enum TelegraphError {
    #[error(transparent)]
    ShortName(#[from] ShortNameError),

    /// The page content tree could not be serialized to JSON.
    #[error("failed to encode page content: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server answered `ok: false`. Carries its description verbatim,
    /// e.g. `PAGE_NOT_FOUND`.
    #[error("telegraph API error: {0}")]
    Api(String),

    /// The `result` payload did not match the type expected for `method`.
    #[error("failed to decode {method} result: {source}")]
    Decode {
        method: &'static str,
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// The transport collaborator failed; propagated unchanged.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// The server returned a non-200 status without a response envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl TelegraphError {
    /// The server-supplied description when this is an API error.
    pub fn api_description(&self) -> Option<&str> {
        match self {
            TelegraphError::Api(description) => Some(description),
            _ => None,
        }
    }
}
