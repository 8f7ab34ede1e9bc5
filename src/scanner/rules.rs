// src/scanner/rules.rs
// =============================================================================
// The Dockerfile policy rules.
//
// Three rules, evaluated in one pass over the file's lines:
//
// 1. Base-image registry policy: FROM lines referencing artifactory must
//    point at the allowed registry. This is an allow-list: a reference is
//    only checked when it carries the artifactory marker (or the
//    ${ARTIFACTORY} template placeholder); plain references like
//    "FROM ubuntu:22.04" are not this rule's business.
// 2. Root-user policy: "USER root" as the first tokens of a line.
// 3. Missing USER directive: a file with no "USER" anywhere gets one
//    warning for the whole file, appended after the line scan.
//
// Rules 1 and 2 fire per matching line, so their alerts interleave in line
// order. Rule 3 fires at most once per file.
// =============================================================================

use std::fmt;

use regex::Regex;
use serde::Serialize;

// Template placeholder that build pipelines substitute with the registry host
const ARTIFACTORY_PLACEHOLDER: &str = "${ARTIFACTORY}";

// Marker substring that puts an image reference under rule 1 at all.
// Case-sensitive: matches hostnames like "artifactory.example", not the
// uppercase template token (the placeholder check above covers that).
const ARTIFACTORY_MARKER: &str = "artifactory";

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A policy violation that must be fixed
    Error,
    /// A gap worth looking at, like a missing USER directive
    Warning,
}

/// One policy violation found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    /// Severity of the finding
    pub severity: Severity,
    /// Repository the file belongs to
    pub repo: String,
    /// Path of the file within the repository
    pub path: String,
    /// Human-readable description of the violated rule
    pub message: String,
}

impl Alert {
    fn error(repo: &str, path: &str, message: String) -> Self {
        Alert {
            severity: Severity::Error,
            repo: repo.to_string(),
            path: path.to_string(),
            message,
        }
    }

    fn warning(repo: &str, path: &str, message: String) -> Self {
        Alert {
            severity: Severity::Warning,
            repo: repo.to_string(),
            path: path.to_string(),
            message,
        }
    }
}

// Renders the alert as a single report line, e.g.
// "❌ svc-a/Dockerfile: Using root user"
impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
        };
        write!(f, "{} {}/{}: {}", marker, self.repo, self.path, self.message)
    }
}

/// Scans one decoded Dockerfile and returns its alerts in line order,
/// with the whole-file missing-USER warning (if any) last.
pub fn scan_dockerfile(content: &str, repo: &str, path: &str, allowed_registry: &str) -> Vec<Alert> {
    // The FROM keyword is stripped case-insensitively; the rest of the line
    // is the image reference
    let from_pattern = Regex::new(r"(?i)^FROM\s+(.+)").expect("rule 1: invalid regex");

    // Anchored to the start of the line, whitespace allowed before USER.
    // Deliberately no end anchor and no word boundary: "USER rootuser"
    // matches too, and the tests pin that down
    let root_user_pattern = Regex::new(r"^\s*USER\s+root").expect("rule 2: invalid regex");

    let mut alerts = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("FROM") {
            if let Some(caps) = from_pattern.captures(trimmed) {
                let image = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let references_artifactory = image.starts_with(ARTIFACTORY_PLACEHOLDER)
                    || image.contains(ARTIFACTORY_MARKER);
                if references_artifactory && !image.contains(allowed_registry) {
                    alerts.push(Alert::error(
                        repo,
                        path,
                        format!("Invalid ARTIFACTORY usage in FROM: {}", image),
                    ));
                }
            }
        }

        if root_user_pattern.is_match(line) {
            alerts.push(Alert::error(repo, path, "Using root user".to_string()));
        }
    }

    if !content.lines().any(|line| line.contains("USER")) {
        alerts.push(Alert::warning(
            repo,
            path,
            "No USER directive found".to_string(),
        ));
    }

    alerts
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why compile the regexes inside the function?
//    - One compile per scanned file is cheap next to the API calls that
//      fetched it, and it keeps the function self-contained
//
// 2. Why is the FROM gate case-sensitive when the keyword strip is not?
//    - The gate (starts_with("FROM")) decides whether the line is a FROM
//      instruction at all; the regex then strips the keyword leniently.
//      A lowercase "from alpine" line never enters rule 1
//
// 3. Why does rule 3 use a bare substring test?
//    - Any occurrence of "USER" suppresses the warning, even inside a
//      comment or an ENV name. That is the rule's contract, not an
//      accident, and tightening it would change which files get flagged
// -----------------------------------------------------------------------------
