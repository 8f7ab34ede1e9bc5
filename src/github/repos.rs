// src/github/repos.rs
// =============================================================================
// Paginated listing of an organization's repositories.
//
// The GitHub API returns at most 100 repositories per page, so we keep
// requesting pages (starting at 1) until a page comes back empty. The empty
// page is the only termination condition - there is no total-count check.
//
// A non-success response here aborts the entire run: without the repository
// list there is nothing to scan, so the error propagates to the caller.
// =============================================================================

use serde::Deserialize;

use crate::error::Result;
use crate::github::GithubClient;

// One entry of the repository listing response.
// The API returns many more fields; we only need the name.
#[derive(Debug, Deserialize)]
struct Repo {
    name: String,
}

/// Returns the names of all repositories belonging to `org`, in listing order.
pub async fn list_repositories(client: &GithubClient, org: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut page: u32 = 1;

    loop {
        let path = format!("/users/{}/repos?per_page=100&page={}", org, page);
        let repos: Vec<Repo> = client.get_json(&path).await?;

        if repos.is_empty() {
            break;
        }

        names.extend(repos.into_iter().map(|repo| repo.name));
        page += 1;
    }

    Ok(names)
}
