use crate::config::CheckConfig;

/// Assemble the `check-release` argument list from the configuration.
///
/// The order is fixed and documented: package filters, exclusions, manifest
/// path, release type, feature-group flag, explicit features, verbosity,
/// baseline arguments last. Identical configuration always yields an
/// identical sequence.
#[must_use]
pub fn assemble_args(config: &CheckConfig, baseline_rev: Option<&str>) -> Vec<String> {
    let mut args = Vec::new();

    for package in &config.packages {
        args.push("--package".to_string());
        args.push(package.clone());
    }
    for package in &config.excluded {
        args.push("--exclude".to_string());
        args.push(package.clone());
    }
    if let Some(path) = &config.manifest_path {
        args.push("--manifest-path".to_string());
        args.push(path.to_string_lossy().into_owned());
    }
    if let Some(release_type) = config.release_type {
        args.push("--release-type".to_string());
        args.push(release_type.as_str().to_string());
    }
    if let Some(flag) = config.feature_group.flag() {
        args.push(flag.to_string());
    }
    for feature in &config.features {
        args.push("--features".to_string());
        args.push(feature.clone());
    }
    if config.verbose {
        args.push("--verbose".to_string());
    }
    if let Some(rev) = baseline_rev {
        args.push("--baseline-rev".to_string());
        args.push(rev.to_string());
        args.push("--json".to_string());
    }

    args
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
