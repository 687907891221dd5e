use std::time::Duration;

use serde::Deserialize;

use crate::{Result, SemverGuardError};

/// GitHub project publishing the checker's release assets.
pub const TOOL_OWNER: &str = "obi1kenobi";
/// Repository (and crate, and binary) name of the checker.
pub const TOOL_NAME: &str = "cargo-semver-checks";

const API_BASE: &str = "https://api.github.com";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("semver-guard/", env!("CARGO_PKG_VERSION"));

/// One downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A published release with its asset list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Select the asset whose name ends with `<target-triple>.tar.gz`.
    ///
    /// # Errors
    /// Returns a descriptive lookup error when no asset matches.
    pub fn asset_for_target(&self, target: &str) -> Result<&ReleaseAsset> {
        let suffix = format!("{target}.tar.gz");
        self.assets
            .iter()
            .find(|asset| asset.name.ends_with(&suffix))
            .ok_or_else(|| {
                SemverGuardError::AssetLookup(format!(
                    "release {} has no asset ending with '{suffix}'",
                    self.tag_name
                ))
            })
    }
}

/// Release-index collaborator: looks up the latest published release and
/// downloads assets.
pub trait ReleaseIndex {
    /// # Errors
    /// Returns an error on network failure, a non-success HTTP status, a
    /// malformed response, or a missing credential.
    fn latest_release(&self) -> Result<Release>;

    /// # Errors
    /// Returns an error on network failure or a non-success HTTP status.
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production release index backed by the GitHub REST API.
///
/// Cannot be unit tested without a real HTTP server, so it is excluded from
/// coverage measurement.
#[derive(Debug)]
pub struct GithubReleaseIndex {
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubReleaseIndex {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            owner: TOOL_OWNER.to_string(),
            repo: TOOL_NAME.to_string(),
            token,
        }
    }

    fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            SemverGuardError::Environment(
                "GITHUB_TOKEN is required to query the release index".to_string(),
            )
        })
    }

    fn client() -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SemverGuardError::Http(format!("failed to create HTTP client: {e}")))
    }
}

#[cfg(not(tarpaulin_include))]
impl ReleaseIndex for GithubReleaseIndex {
    fn latest_release(&self) -> Result<Release> {
        let token = self.token()?;
        let url = format!(
            "{API_BASE}/repos/{}/{}/releases/latest",
            self.owner, self.repo
        );
        let response = Self::client()?
            .get(&url)
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|e| SemverGuardError::Http(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SemverGuardError::Http(format!("GET {url}: HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| SemverGuardError::Http(format!("GET {url}: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let mut request = Self::client()?.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .map_err(|e| SemverGuardError::Http(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SemverGuardError::Http(format!("GET {url}: HTTP {status}")));
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| SemverGuardError::Http(format!("GET {url}: {e}")))
    }
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;
