// src/error.rs
// =============================================================================
// Typed error kinds for everything that can go wrong talking to GitHub.
//
// Failures are distinguished by variant, not by message text, so the
// orchestrator can decide per call site whether a failure is fatal (the
// repository listing) or means "no data for this unit" (tree walk, content
// fetch).
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GithubError {
    /// The API answered with a non-success status code.
    #[error("GitHub API returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The contents API body was not valid base64.
    #[error("failed to decode base64 file content")]
    Base64(#[from] base64::DecodeError),

    /// The decoded file content was not valid UTF-8.
    #[error("file content is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, GithubError>;
