//! Pull-request baseline resolution over the `git` CLI.

use crate::process::{CommandResult, Invocation, Runner};
use crate::{Result, SemverGuardError};

/// Resolves the comparison point for a pull request: the merge-base of the
/// change branch and its target branch.
///
/// The merge-base isolates changes introduced by the branch from unrelated
/// commits that landed on the target since divergence; comparing against the
/// target's current tip would falsely attribute those to the branch under
/// test.
pub struct BaselineResolver<'a> {
    runner: &'a dyn Runner,
}

impl<'a> BaselineResolver<'a> {
    #[must_use]
    pub const fn new(runner: &'a dyn Runner) -> Self {
        Self { runner }
    }

    /// Fetch both branches, switch the working tree to the change branch's
    /// tip, and return the merge-base commit id.
    ///
    /// # Errors
    /// Any failing fetch, switch or merge-base step is fatal; an incomplete
    /// history makes the merge-base undefined, so there is no fallback.
    pub fn resolve(&self, head_branch: &str, base_branch: &str) -> Result<String> {
        self.fetch(head_branch)?;
        self.fetch(base_branch)?;
        self.switch_to(head_branch)?;
        self.merge_base(head_branch, base_branch)
    }

    fn fetch(&self, branch: &str) -> Result<()> {
        let refspec = format!("+refs/heads/{branch}:{}", tracking_ref(branch));
        self.git(&["fetch", "--no-tags", "origin", refspec.as_str()])
            .map(drop)
    }

    /// Put the working tree on the change branch's tip so the compiled
    /// artifacts reflect the change under test, not a stale detached state.
    fn switch_to(&self, branch: &str) -> Result<()> {
        let tracking = tracking_ref(branch);
        self.git(&["switch", "--force-create", branch, tracking.as_str()])
            .map(drop)
    }

    fn merge_base(&self, head_branch: &str, base_branch: &str) -> Result<String> {
        let head = tracking_ref(head_branch);
        let base = tracking_ref(base_branch);
        let result = self.git(&["merge-base", head.as_str(), base.as_str()])?;
        let commit = result.stdout.trim();
        if commit.is_empty() {
            return Err(SemverGuardError::Git(format!(
                "merge-base of '{head_branch}' and '{base_branch}' produced no commit"
            )));
        }
        Ok(commit.to_string())
    }

    fn git(&self, args: &[&str]) -> Result<CommandResult> {
        let result = self.runner.run(&Invocation::new("git").args(args.iter().copied()))?;
        if result.success() {
            Ok(result)
        } else {
            Err(SemverGuardError::Git(format!(
                "git {} failed (exit code {}): {}",
                args.join(" "),
                result.exit_code,
                result.stderr.trim()
            )))
        }
    }
}

fn tracking_ref(branch: &str) -> String {
    format!("refs/remotes/origin/{branch}")
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
