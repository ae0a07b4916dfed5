//! Error types for the headlines client.
//!
//! # Design
//! Each variant names one failure kind so callers can react differently to a
//! dead network, an HTTP error status, an error envelope from NewsAPI itself,
//! or a body that is not the JSON we expect.

use thiserror::Error;

/// Errors produced while fetching top headlines.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response: DNS, connect, TLS, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status and no NewsAPI error body.
    #[error("HTTP {status}: {}", body_preview(.body))]
    Status { status: u16, body: String },

    /// NewsAPI reported `"status": "error"` with a code and message.
    #[error("news API error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be decoded as a top-headlines payload.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Longest slice of a response body shown in an error message.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Cut `body` down to `BODY_PREVIEW_CHARS` characters for display.
fn body_preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &body[..cut], body.len() - cut),
    }
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {name} is not valid unicode")]
    NotUnicode { name: &'static str },
}
