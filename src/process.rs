use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::env_config::EnvConfig;
use crate::{Result, SemverGuardError};

/// Captured outcome of a finished child process.
///
/// Produced once per invocation and never mutated. The exit code is data,
/// not a failure signal; callers opt in to failure via `require_success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Convert a non-zero exit into an error.
    ///
    /// # Errors
    /// Returns `CommandFailed` carrying the program name, exit code and
    /// captured stderr when the exit code is non-zero.
    pub fn require_success(self, program: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(SemverGuardError::CommandFailed {
                program: program.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// A single external command: program, arguments, environment overrides and
/// an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Apply a stage environment: its variable overrides plus a PATH that
    /// includes any prepended directories. Later `env` calls still win.
    #[must_use]
    pub fn env_config(mut self, cfg: &EnvConfig) -> Self {
        self.env.extend(cfg.invocation_env());
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Human-readable command line for log output.
    #[must_use]
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Executes invocations and captures their output.
pub trait Runner {
    /// Run the command to completion, blocking the caller.
    ///
    /// # Errors
    /// Returns an error only when the process cannot be spawned; a non-zero
    /// exit code is reported through the result, not as an error.
    fn run(&self, invocation: &Invocation) -> Result<CommandResult>;
}

/// Production runner backed by `std::process::Command`.
///
/// Stdout and stderr are captured into two independent buffers in arrival
/// order; they are never interleaved. The pipeline is strictly sequential,
/// so blocking here is intended.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null());
        for (key, value) in &invocation.env {
            command.env(key, value);
        }
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| SemverGuardError::Spawn {
            program: invocation.program.clone(),
            source: e,
        })?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
#[path = "process_testing.rs"]
pub(crate) mod testing;

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
