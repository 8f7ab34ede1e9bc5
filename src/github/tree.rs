// src/github/tree.rs
// =============================================================================
// Recursive file-tree walk for one repository.
//
// One call fetches the whole tree of the default branch (ref "HEAD",
// recursive=1) and filters it down to paths containing "Dockerfile".
//
// The filter is a plain case-sensitive substring test, so it also matches
// "Dockerfile.dev" and files under a "Dockerfile-templates" directory.
//
// Unlike the repository listing, a failure here is not fatal to the run:
// the orchestrator treats it as "this repository has no matching files".
// The typed error still reaches the orchestrator so it can be surfaced
// with --verbose.
// =============================================================================

use serde::Deserialize;

use crate::error::Result;
use crate::github::GithubClient;

// The tree response; truncated trees still carry a "tree" array, and a
// missing one is treated as empty
#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
}

/// Returns the paths in `repo`'s default-branch tree that contain the
/// substring "Dockerfile", in tree order.
pub async fn find_dockerfiles(client: &GithubClient, owner: &str, repo: &str) -> Result<Vec<String>> {
    let path = format!("/repos/{}/{}/git/trees/HEAD?recursive=1", owner, repo);
    let response: TreeResponse = client.get_json(&path).await?;

    Ok(response
        .tree
        .into_iter()
        .map(|entry| entry.path)
        .filter(|path| path.contains("Dockerfile"))
        .collect())
}
