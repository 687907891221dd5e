use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemverGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Installation error: {0}")]
    Install(String),

    #[error("No release asset matches the current platform: {0}")]
    AssetLookup(String),

    #[error("Toolchain error: {0}")]
    Toolchain(String),

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{program}' failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SemverGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
