// src/github/mod.rs
// =============================================================================
// This module handles talking to the GitHub REST API.
//
// Submodules:
// - client: Authenticated HTTP transport and JSON decoding
// - repos: Paginated listing of an organization's repositories
// - tree: Recursive file-tree walk, filtered down to Dockerfiles
// - content: Fetching and base64-decoding a single file's content
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod client;
mod content;
mod repos;
mod tree;

// Re-export public items from submodules
// This lets users write `github::list_repositories()` instead of
// `github::repos::list_repositories()`
pub use client::GithubClient;
pub use content::fetch_content;
pub use repos::list_repositories;
pub use tree::find_dockerfiles;
