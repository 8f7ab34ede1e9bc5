// src/github/client.rs
// =============================================================================
// Authenticated transport for the GitHub REST API.
//
// One GithubClient is built at startup and reused for every request:
// - The underlying reqwest::Client pools connections across calls
// - The token and headers are fixed for the whole run, never mutated
//
// Every call is a GET that either deserializes the JSON response body or
// fails with a typed error: Transport carries the status and body for
// non-success responses, Request covers connection-level failures.
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{GithubError, Result};

/// Base URL of the real GitHub API. Tests substitute a local mock server.
pub const GITHUB_API: &str = "https://api.github.com";

/// Authenticated GitHub API client, constructed once per run.
pub struct GithubClient {
    http: Client,
    api_base: String,
    token: String,
}

impl GithubClient {
    /// Creates a client against the real GitHub API.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_base(token, GITHUB_API)
    }

    /// Creates a client against an alternate base URL (used by tests).
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        // GitHub rejects requests without a User-Agent, so set one up front
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("image-guardian/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    // Issues a GET request against the API and deserializes the JSON body.
    //
    // `path_and_query` is everything after the base URL, e.g.
    // "/users/my-org/repos?per_page=100&page=1".
    //
    // A non-success status becomes GithubError::Transport carrying the
    // response body, so the caller can decide whether that is fatal.
    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base, path_and_query);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Transport { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}
