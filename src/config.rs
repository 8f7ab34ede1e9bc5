// src/config.rs
// =============================================================================
// Process-wide configuration.
//
// Everything the scan needs is resolved once at startup into a Config struct
// and passed by reference into the components that need it. Nothing here is
// mutated after construction, and nothing lives in a global.
//
// The token deliberately never has a hard-coded default: it comes from the
// --token flag or the GITHUB_TOKEN environment variable.
// =============================================================================

use anyhow::{anyhow, Result};

use crate::cli::Cli;

/// Configuration for one scan run, built once in main and then read-only.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub organization or username whose repositories are scanned
    pub org: String,
    /// Personal access token sent with every API request
    pub token: String,
    /// Substring an artifactory image reference must contain to be allowed
    pub allowed_registry: String,
}

impl Config {
    // Resolves the configuration from parsed CLI arguments.
    //
    // The token lookup order is: --token flag, then GITHUB_TOKEN env var.
    // A missing token is a startup error, not something to discover three
    // API calls into the run.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let token = match &cli.token {
            Some(token) => token.clone(),
            None => std::env::var("GITHUB_TOKEN")
                .map_err(|_| anyhow!("no GitHub token: pass --token or set GITHUB_TOKEN"))?,
        };

        Ok(Config {
            org: cli.org.clone(),
            token,
            allowed_registry: cli.allowed_registry.clone(),
        })
    }
}
