use crate::cli::{Cli, InstallArgs};
use crate::config::load_file_config;
use crate::context::RunContext;
use crate::env_config::EnvConfig;
use crate::installer::{GithubReleaseIndex, ToolInstaller};
use crate::process::ProcessRunner;
use crate::toolchain::ToolchainProvisioner;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

const DEFAULT_TOOLCHAIN: &str = "stable";

#[must_use]
pub fn run_install(args: &InstallArgs, cli: &Cli) -> i32 {
    match run_install_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Provision the toolchain and install the checker, then stop. Useful for
/// warming a runner image ahead of the first real check.
fn run_install_impl(args: &InstallArgs, cli: &Cli) -> Result<()> {
    let file_config = load_file_config(args.config.as_deref(), cli.no_config)?;
    let toolchain = args
        .toolchain
        .clone()
        .or(file_config.toolchain)
        .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string());

    let runner = ProcessRunner;
    let mut env = EnvConfig::new();
    ToolchainProvisioner::new(&runner).provision(&toolchain, &mut env)?;

    let token = args
        .github_token
        .clone()
        .or_else(|| RunContext::from_env().token);
    let index = GithubReleaseIndex::new(token);
    let installer = ToolInstaller::new(&runner, &index, &env)?;
    let outcome = installer.ensure_installed(&mut env)?;

    if !cli.quiet {
        println!("cargo-semver-checks: {outcome}");
    }
    Ok(())
}
