// src/github/content.rs
// =============================================================================
// Fetching and decoding a single file's content.
//
// The contents API returns file bodies base64-encoded, hard-wrapped with
// newlines every 60 characters. The standard base64 engine rejects those
// embedded newlines, so all ASCII whitespace is stripped before decoding.
//
// Failure modes are deliberately split:
// - A non-success response (file vanished between tree walk and fetch,
//   oversized blob, etc.) is a Transport error the orchestrator skips over.
// - A decode failure (bad base64, non-UTF-8 bytes) means we got a response
//   we cannot interpret, and that aborts the run.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::Result;
use crate::github::GithubClient;

// Metadata for one file; "content" is absent for some entry types, which
// decodes the same as an empty file
#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    content: String,
}

/// Fetches `path` from `repo` and returns its decoded text content.
pub async fn fetch_content(
    client: &GithubClient,
    owner: &str,
    repo: &str,
    path: &str,
) -> Result<String> {
    let api_path = format!("/repos/{}/{}/contents/{}", owner, repo, path);
    let file: ContentFile = client.get_json(&api_path).await?;
    decode_content(&file.content)
}

// Strips the wrapping whitespace and decodes base64 to UTF-8 text
fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}
