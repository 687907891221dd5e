use std::path::PathBuf;

use indexmap::IndexSet;

use crate::cli::CheckArgs;
use crate::config::loader::FileConfig;
use crate::context::RunContext;
use crate::{Result, SemverGuardError};

/// Toolchain name that disables provisioning entirely.
pub const MANUAL_TOOLCHAIN: &str = "manual";

const DEFAULT_TOOLCHAIN: &str = "stable";

/// Named policy controlling which optional features are enabled during the
/// check. Closed enumeration: anything else is a configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeatureGroup {
    /// No feature flag is passed; the checker applies its own default.
    #[default]
    None,
    AllFeatures,
    DefaultFeatures,
    OnlyExplicitFeatures,
}

impl FeatureGroup {
    /// Parse a feature-group name. The empty string maps to `None`.
    ///
    /// # Errors
    /// Returns a configuration error for any unrecognized name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "" => Ok(Self::None),
            "all-features" => Ok(Self::AllFeatures),
            "default-features" => Ok(Self::DefaultFeatures),
            "only-explicit-features" => Ok(Self::OnlyExplicitFeatures),
            other => Err(SemverGuardError::Config(format!(
                "Unrecognized feature group: '{other}' \
                 (expected all-features, default-features or only-explicit-features)"
            ))),
        }
    }

    /// The command-line flag this group maps to, if any.
    #[must_use]
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::AllFeatures => Some("--all-features"),
            Self::DefaultFeatures => Some("--default-features"),
            Self::OnlyExplicitFeatures => Some("--only-explicit-features"),
        }
    }
}

/// Release type passed through to the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl ReleaseType {
    /// # Errors
    /// Returns a configuration error for any unrecognized name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            other => Err(SemverGuardError::Config(format!(
                "Unrecognized release type: '{other}' (expected major, minor or patch)"
            ))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

/// How the baseline for the comparison is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BaselineMode {
    /// Compare against the recorded prior version of the checked-out state;
    /// the checker resolves this on its own.
    #[default]
    None,
    /// Compare against the merge-base of the change branch and its target.
    PullRequest {
        head_branch: String,
        base_branch: String,
    },
}

impl BaselineMode {
    /// Derive the baseline mode from the run context.
    ///
    /// A pull-request context without both branch names is a configuration
    /// error; silently comparing against the registry release would report
    /// wrong results for the PR.
    ///
    /// # Errors
    /// Returns a configuration error when the context says pull-request but
    /// either branch name is missing.
    pub fn from_context(ctx: &RunContext) -> Result<Self> {
        if !ctx.is_pull_request() {
            return Ok(Self::None);
        }
        match (&ctx.head_branch, &ctx.base_branch) {
            (Some(head), Some(base)) => Ok(Self::PullRequest {
                head_branch: head.clone(),
                base_branch: base.clone(),
            }),
            _ => Err(SemverGuardError::Config(
                "Pull-request run is missing GITHUB_HEAD_REF or GITHUB_BASE_REF".to_string(),
            )),
        }
    }
}

/// Immutable configuration for one check run.
///
/// Assembled exactly once, before any external process starts, and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub packages: IndexSet<String>,
    pub excluded: IndexSet<String>,
    pub manifest_path: Option<PathBuf>,
    pub release_type: Option<ReleaseType>,
    pub feature_group: FeatureGroup,
    pub features: IndexSet<String>,
    pub verbose: bool,
    pub baseline: BaselineMode,
    pub toolchain: String,
}

impl CheckConfig {
    /// Build the configuration from CLI arguments, the optional config file
    /// and the run context. CLI values override file values.
    ///
    /// # Errors
    /// Returns a configuration error for unrecognized enum names, a missing
    /// manifest, or incomplete pull-request branch context.
    pub fn assemble(
        args: &CheckArgs,
        file: &FileConfig,
        ctx: &RunContext,
        verbose: bool,
    ) -> Result<Self> {
        let packages = pick_list(&args.packages, &file.package);
        let excluded = pick_list(&args.exclude, &file.exclude);
        let features = pick_list(&args.features, &file.features);

        let manifest_path = args
            .manifest_path
            .clone()
            .or_else(|| file.manifest_path.clone());
        if let Some(path) = &manifest_path
            && !path.is_file()
        {
            return Err(SemverGuardError::Config(format!(
                "Manifest not found: {}",
                path.display()
            )));
        }

        let release_type = pick_value(&args.release_type, &file.release_type)
            .map(|name| ReleaseType::parse(&name))
            .transpose()?;
        let feature_group = FeatureGroup::parse(
            &pick_value(&args.feature_group, &file.feature_group).unwrap_or_default(),
        )?;
        let toolchain = pick_value(&args.toolchain, &file.toolchain)
            .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string());

        Ok(Self {
            packages,
            excluded,
            manifest_path,
            release_type,
            feature_group,
            features,
            verbose,
            baseline: BaselineMode::from_context(ctx)?,
            toolchain,
        })
    }

    /// Directory containing the manifest under check.
    #[must_use]
    pub fn manifest_dir(&self) -> PathBuf {
        self.manifest_path
            .as_deref()
            .and_then(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf)
    }
}

fn pick_list(cli: &[String], file: &[String]) -> IndexSet<String> {
    let chosen = if cli.is_empty() { file } else { cli };
    chosen.iter().cloned().collect()
}

fn pick_value(cli: &Option<String>, file: &Option<String>) -> Option<String> {
    cli.clone().or_else(|| file.clone())
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
