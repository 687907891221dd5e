//! Run context derived from the CI environment.

/// Environment-derived inputs for a single run.
///
/// Captured once at startup; empty variables are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Event that triggered the run (e.g. "push", "pull_request").
    pub event_name: Option<String>,
    /// Branch under test in pull-request mode.
    pub head_branch: Option<String>,
    /// Branch the pull request targets.
    pub base_branch: Option<String>,
    /// Credential for the release index.
    pub token: Option<String>,
}

impl RunContext {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            event_name: env_non_empty("GITHUB_EVENT_NAME"),
            head_branch: env_non_empty("GITHUB_HEAD_REF"),
            base_branch: env_non_empty("GITHUB_BASE_REF"),
            token: env_non_empty("GITHUB_TOKEN"),
        }
    }

    /// Whether the run context indicates a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        matches!(
            self.event_name.as_deref(),
            Some("pull_request" | "pull_request_target")
        )
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
