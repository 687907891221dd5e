use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "semver-guard")]
#[command(author, version, about = "Semantic-versioning guard - run cargo-semver-checks with the right baseline")]
#[command(long_about = "Orchestrates a cargo-semver-checks run in CI: provisions a toolchain,\n\
    installs the checker (precompiled download with a source-build fallback),\n\
    restores/saves build artifacts and resolves the pull-request baseline.\n\n\
    Exit codes:\n  \
    0 - No semver violations found\n  \
    1 - cargo-semver-checks reported violations\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Pass --verbose through to cargo-semver-checks
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip loading the configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: provision, install, restore cache, check, save cache
    Check(CheckArgs),

    /// Provision the toolchain and install cargo-semver-checks, then stop
    Install(InstallArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Package to check (repeatable; default: all workspace packages)
    #[arg(short, long = "package")]
    pub packages: Vec<String>,

    /// Package to exclude from the check (repeatable)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Path to the Cargo.toml of the project under check
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Release type to assume instead of inferring it from version numbers
    /// [possible values: major, minor, patch]
    #[arg(long)]
    pub release_type: Option<String>,

    /// Feature group to enable
    /// [possible values: all-features, default-features, only-explicit-features]
    #[arg(long)]
    pub feature_group: Option<String>,

    /// Explicit features to enable (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Toolchain to provision ("manual" skips provisioning)
    #[arg(long)]
    pub toolchain: Option<String>,

    /// Token for the release index (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Toolchain to provision ("manual" skips provisioning)
    #[arg(long)]
    pub toolchain: Option<String>,

    /// Token for the release index (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
