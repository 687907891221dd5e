use std::path::PathBuf;

use crate::cache::{ArtifactStore, CacheCoordinator, LocalStore, SaveOutcome};
use crate::checker::CheckRunner;
use crate::cli::{CheckArgs, Cli};
use crate::config::{BaselineMode, CheckConfig, load_file_config};
use crate::context::RunContext;
use crate::env_config::EnvConfig;
use crate::git::BaselineResolver;
use crate::installer::{GithubReleaseIndex, ReleaseIndex, TARGET_TRIPLE, ToolInstaller};
use crate::output::{self, Annotation, AnnotationLocation};
use crate::process::{CommandResult, ProcessRunner, Runner};
use crate::toolchain::ToolchainProvisioner;
use crate::{EXIT_CHECK_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    // 1. Assemble the configuration; nothing external may run before this
    //    succeeds.
    let file_config = load_file_config(args.config.as_deref(), cli.no_config)?;
    let ctx = RunContext::from_env();
    let config = CheckConfig::assemble(args, &file_config, &ctx, cli.verbose)?;

    // 2. Wire up the real collaborators.
    let token = args.github_token.clone().or_else(|| ctx.token.clone());
    let runner = ProcessRunner;
    let index = GithubReleaseIndex::new(token);
    let store = LocalStore::open_default()?;
    let deps = PipelineDeps {
        runner: &runner,
        index: &index,
        store: &store,
        lookup_dirs: None,
        tool_dir: None,
        quiet: cli.quiet,
    };

    run_pipeline(&config, &deps)
}

/// Collaborators the pipeline runs against. Tests substitute mocks here.
pub(crate) struct PipelineDeps<'a> {
    pub runner: &'a dyn Runner,
    pub index: &'a dyn ReleaseIndex,
    pub store: &'a dyn ArtifactStore,
    /// Directories searched for the tool binary; `None` derives them from
    /// the stage environment's search path.
    pub lookup_dirs: Option<Vec<PathBuf>>,
    /// Directory precompiled downloads land in; `None` uses the per-user
    /// default.
    pub tool_dir: Option<PathBuf>,
    pub quiet: bool,
}

/// The strictly sequential pipeline: provision, install, restore, check,
/// save. Each stage depends on side effects of the previous one, so no two
/// stages ever overlap.
pub(crate) fn run_pipeline(config: &CheckConfig, deps: &PipelineDeps) -> Result<i32> {
    let mut env = EnvConfig::new();

    // 1. Toolchain
    staged(deps.quiet, "Provision toolchain", || {
        ToolchainProvisioner::new(deps.runner).provision(&config.toolchain, &mut env)
    })?;

    // 2. Tool installation
    let outcome = staged(deps.quiet, "Install cargo-semver-checks", || {
        let installer = build_installer(deps, &env)?;
        installer.ensure_installed(&mut env)
    })?;
    if !deps.quiet {
        println!("cargo-semver-checks: {outcome}");
    }

    // 3. Cache restore; a miss just means a cold build, and a broken store
    //    must not block the check either.
    let coordinator = CacheCoordinator::new(deps.store, &config.manifest_dir())?;
    let restored = match coordinator.restore() {
        Ok(hit) => hit,
        Err(e) => {
            output::warning(&format!("Cache restore failed: {e}"));
            false
        }
    };
    if !deps.quiet && restored {
        println!("Restored build artifacts from cache");
    }

    // 4. Baseline (pull-request mode only)
    let baseline_rev = match &config.baseline {
        BaselineMode::None => None,
        BaselineMode::PullRequest {
            head_branch,
            base_branch,
        } => Some(staged(deps.quiet, "Resolve pull-request baseline", || {
            BaselineResolver::new(deps.runner).resolve(head_branch, base_branch)
        })?),
    };

    // 5. Check; the exit code comes back as data so the save below always
    //    runs first.
    let check_result = CheckRunner::new(deps.runner).run(config, baseline_rev.as_deref(), &env);

    // 6. Cache save, unconditionally: a prior successful build must never be
    //    lost to a failing check.
    match coordinator.save() {
        Ok(SaveOutcome::Saved) => {
            if !deps.quiet {
                println!("Saved build artifacts to cache");
            }
        }
        Ok(SaveOutcome::Skipped) => {}
        Err(e) => output::warning(&format!("Cache save failed: {e}")),
    }

    finish_check(config, check_result?)
}

fn build_installer<'a>(
    deps: &'a PipelineDeps<'a>,
    env: &EnvConfig,
) -> Result<ToolInstaller<'a>> {
    match (&deps.lookup_dirs, &deps.tool_dir) {
        (Some(lookup_dirs), Some(tool_dir)) => Ok(ToolInstaller::with_paths(
            deps.runner,
            deps.index,
            lookup_dirs.clone(),
            tool_dir.clone(),
            TARGET_TRIPLE,
        )),
        _ => ToolInstaller::new(deps.runner, deps.index, env),
    }
}

fn finish_check(config: &CheckConfig, result: CommandResult) -> Result<i32> {
    if !result.stdout.is_empty() {
        print!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }
    if result.success() {
        return Ok(EXIT_SUCCESS);
    }

    let manifest = config.manifest_path.as_deref().map_or_else(
        || "Cargo.toml".to_string(),
        |path| path.to_string_lossy().into_owned(),
    );
    output::error(&Annotation {
        location: AnnotationLocation::new(manifest, 1, 1),
        message: format!(
            "cargo-semver-checks found changes that violate semantic versioning \
             (exit code {}).",
            result.exit_code
        ),
    });
    Ok(EXIT_CHECK_FAILED)
}

fn staged<T>(quiet: bool, name: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if !quiet {
        output::group(name);
    }
    let result = f();
    if !quiet {
        output::end_group();
    }
    result
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
