// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve the run configuration (org, token, allowed registry)
// 3. Walk every repository: find Dockerfiles, fetch them, scan them
// 4. Print the collected alerts (or a success line) and exit
//
// The scan is deliberately sequential: one repository at a time, one file
// at a time. The rate of API calls stays low and the report order stays
// deterministic (repository listing order, then tree order within a repo).
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - run configuration
mod error;         // src/error.rs - typed GitHub error kinds
mod github;        // src/github/ - GitHub API access
mod scanner;       // src/scanner/ - Dockerfile policy rules

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::Config;
use error::GithubError;
use github::GithubClient;
use scanner::Alert;

// The #[tokio::main] attribute transforms our async main into a real main
// function by creating a tokio runtime and running our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // An unrecoverable error occurred: print the error chain and
            // exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = scan completed and the report was printed (alerts included)
//   Err   = fatal error (listing failure, decode failure, missing token)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    let client = GithubClient::new(&config.token)?;

    let alerts = scan_org(&client, &config, cli.verbose).await?;

    print_report(&alerts, cli.json)?;
    Ok(0)
}

// Walks every repository of the configured organization and collects all
// policy alerts, in repository listing order then tree order.
//
// Failure handling follows the error kind, decided here and nowhere else:
// - Listing failure: fatal, nothing useful can happen without the repo list
// - Tree walk or content fetch answered non-success: that unit is skipped,
//   announced on stderr only with --verbose
// - Connection-level or decode failures: fatal, the run cannot trust what
//   it would print
async fn scan_org(client: &GithubClient, config: &Config, verbose: bool) -> Result<Vec<Alert>> {
    let mut all_alerts = Vec::new();

    let repos = github::list_repositories(client, &config.org).await?;

    for repo in &repos {
        println!("🔍 Scanning repo: {}", repo);

        let dockerfiles = match github::find_dockerfiles(client, &config.org, repo).await {
            Ok(paths) => paths,
            Err(err @ GithubError::Transport { .. }) => {
                if verbose {
                    eprintln!("  Warning: skipping tree of {}: {}", repo, err);
                }
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        for path in &dockerfiles {
            let content = match github::fetch_content(client, &config.org, repo, path).await {
                Ok(content) => content,
                Err(err @ GithubError::Transport { .. }) => {
                    if verbose {
                        eprintln!("  Warning: skipping {}/{}: {}", repo, path, err);
                    }
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            // Files that decode to nothing are skipped entirely, the same
            // as a failed fetch: no alerts, not even the missing-USER one
            if content.is_empty() {
                continue;
            }

            all_alerts.extend(scanner::scan_dockerfile(
                &content,
                repo,
                path,
                &config.allowed_registry,
            ));
        }
    }

    Ok(all_alerts)
}

// Prints the final report either as plain alert lines or as JSON
fn print_report(alerts: &[Alert], json: bool) -> Result<()> {
    if json {
        // Serialize alerts to JSON and print
        let json_output = serde_json::to_string_pretty(alerts)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!("\n--- Alerts ---");
    if alerts.is_empty() {
        println!("✅ No issues found");
    } else {
        for alert in alerts {
            println!("{}", alert);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use mockito::{Server, ServerGuard};
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            org: "test-org".to_string(),
            token: "test-token".to_string(),
            allowed_registry: "private.artifactory".to_string(),
        }
    }

    // Mocks the listing endpoint: one page with the given repos, then an
    // empty page to terminate pagination
    async fn mock_repo_listing(server: &mut ServerGuard, repos: &[&str]) {
        let body: Vec<serde_json::Value> = repos.iter().map(|r| json!({ "name": r })).collect();
        server
            .mock("GET", "/users/test-org/repos?per_page=100&page=1")
            .with_status(200)
            .with_body(serde_json::Value::Array(body).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/users/test-org/repos?per_page=100&page=2")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
    }

    async fn mock_tree(server: &mut ServerGuard, repo: &str, paths: &[&str]) {
        let entries: Vec<serde_json::Value> =
            paths.iter().map(|p| json!({ "path": p })).collect();
        server
            .mock(
                "GET",
                format!("/repos/test-org/{}/git/trees/HEAD?recursive=1", repo).as_str(),
            )
            .with_status(200)
            .with_body(json!({ "tree": entries }).to_string())
            .create_async()
            .await;
    }

    async fn mock_content(server: &mut ServerGuard, repo: &str, path: &str, text: &str) {
        server
            .mock(
                "GET",
                format!("/repos/test-org/{}/contents/{}", repo, path).as_str(),
            )
            .with_status(200)
            .with_body(json!({ "content": STANDARD.encode(text) }).to_string())
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn test_end_to_end_single_repo_missing_user() {
        let mut server = Server::new_async().await;
        mock_repo_listing(&mut server, &["svc-a"]).await;
        mock_tree(&mut server, "svc-a", &["Dockerfile", "README.md"]).await;
        mock_content(
            &mut server,
            "svc-a",
            "Dockerfile",
            "FROM ubuntu:22.04\nRUN apt-get update\n",
        )
        .await;

        let client = GithubClient::with_api_base("test-token", &server.url()).unwrap();
        let alerts = scan_org(&client, &test_config(), false).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, scanner::Severity::Warning);
        assert_eq!(
            alerts[0].to_string(),
            "⚠️ svc-a/Dockerfile: No USER directive found"
        );
    }

    #[tokio::test]
    async fn test_zero_repositories_yield_no_alerts() {
        let mut server = Server::new_async().await;
        mock_repo_listing(&mut server, &[]).await;

        let client = GithubClient::with_api_base("test-token", &server.url()).unwrap();
        let alerts = scan_org(&client, &test_config(), false).await.unwrap();

        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_failed_tree_walk_skips_repository() {
        let mut server = Server::new_async().await;
        mock_repo_listing(&mut server, &["broken", "svc-a"]).await;
        server
            .mock("GET", "/repos/test-org/broken/git/trees/HEAD?recursive=1")
            .with_status(409)
            .with_body("Git Repository is empty.")
            .create_async()
            .await;
        mock_tree(&mut server, "svc-a", &["Dockerfile"]).await;
        mock_content(&mut server, "svc-a", "Dockerfile", "USER root\n").await;

        let client = GithubClient::with_api_base("test-token", &server.url()).unwrap();
        let alerts = scan_org(&client, &test_config(), false).await.unwrap();

        // The broken repository contributes nothing; the scan continues
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].to_string(), "❌ svc-a/Dockerfile: Using root user");
    }

    #[tokio::test]
    async fn test_failed_content_fetch_skips_file() {
        let mut server = Server::new_async().await;
        mock_repo_listing(&mut server, &["svc-a"]).await;
        mock_tree(&mut server, "svc-a", &["Dockerfile", "Dockerfile.dev"]).await;
        server
            .mock("GET", "/repos/test-org/svc-a/contents/Dockerfile")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;
        mock_content(&mut server, "svc-a", "Dockerfile.dev", "USER root\n").await;

        let client = GithubClient::with_api_base("test-token", &server.url()).unwrap();
        let alerts = scan_org(&client, &test_config(), false).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].path, "Dockerfile.dev");
    }

    #[tokio::test]
    async fn test_empty_decoded_content_is_skipped() {
        let mut server = Server::new_async().await;
        mock_repo_listing(&mut server, &["svc-a"]).await;
        mock_tree(&mut server, "svc-a", &["Dockerfile"]).await;
        mock_content(&mut server, "svc-a", "Dockerfile", "").await;

        let client = GithubClient::with_api_base("test-token", &server.url()).unwrap();
        let alerts = scan_org(&client, &test_config(), false).await.unwrap();

        // An empty file produces no alerts at all, matching a failed fetch
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_run() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/users/test-org/repos?per_page=100&page=1")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = GithubClient::with_api_base("test-token", &server.url()).unwrap();
        let result = scan_org(&client, &test_config(), false).await;

        assert!(result.is_err());
    }
}
