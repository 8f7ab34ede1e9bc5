// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// image-guardian has a single operation (scan an organization), so there are
// no subcommands: just a positional argument and a few flags.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "image-guardian",
    version = "0.1.0",
    about = "Scan an organization's GitHub repositories for Dockerfile policy violations",
    long_about = "image-guardian walks every repository of a GitHub organization or user, \
                  finds Dockerfiles, and checks them against base-image registry and \
                  root-user policies. It's perfect for CI/CD pipelines to keep container \
                  builds compliant."
)]
pub struct Cli {
    /// GitHub organization or username to scan (e.g., my-org)
    ///
    /// This is a positional argument (required, no flag needed)
    pub org: String,

    /// GitHub personal access token
    ///
    /// Falls back to the GITHUB_TOKEN environment variable when omitted
    #[arg(long)]
    pub token: Option<String>,

    /// Registry substring that makes an artifactory image reference acceptable
    ///
    /// FROM lines referencing artifactory must contain this substring
    #[arg(long, default_value = "private.artifactory")]
    pub allowed_registry: String,

    /// Output the alert report in JSON format instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Print skipped repositories and files (failed API calls) to stderr
    ///
    /// By default a failed tree or content fetch is indistinguishable from
    /// a repository with no Dockerfiles; this flag surfaces the difference
    #[arg(long)]
    pub verbose: bool,
}
