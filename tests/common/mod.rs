#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a semver-guard config file in the temp directory.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".semver-guard.toml", content)
    }
}

/// Runs git in `dir` with a fixed test identity, panicking on failure.
pub fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Runs git in `dir` and returns its trimmed stdout.
pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {args:?} failed in {}", dir.display());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A local "origin" repository plus a fresh clone of it.
///
/// History: `feature-x` branches off `main` at the initial commit, then both
/// branches gain one commit of their own. The fork-point commit is recorded
/// so tests can assert against it.
pub struct BaselineRepos {
    pub root: TempDir,
    pub origin: PathBuf,
    pub work: PathBuf,
    pub fork_point: String,
}

pub fn baseline_repos() -> BaselineRepos {
    let root = TempDir::new().expect("Failed to create temp directory");
    let origin = root.path().join("origin");
    fs::create_dir(&origin).unwrap();

    run_git(&origin, &["init", "-q", "-b", "main"]);
    fs::write(origin.join("VERSION"), "1\n").unwrap();
    run_git(&origin, &["add", "."]);
    run_git(&origin, &["commit", "-q", "-m", "initial"]);
    let fork_point = git_stdout(&origin, &["rev-parse", "HEAD"]);

    run_git(&origin, &["switch", "-q", "-c", "feature-x"]);
    fs::write(origin.join("VERSION"), "2\n").unwrap();
    run_git(&origin, &["commit", "-q", "-am", "bump version"]);

    run_git(&origin, &["switch", "-q", "main"]);
    fs::write(origin.join("NOTES"), "unrelated mainline work\n").unwrap();
    run_git(&origin, &["add", "."]);
    run_git(&origin, &["commit", "-q", "-m", "unrelated change"]);

    let work = root.path().join("work");
    run_git(
        root.path(),
        &["clone", "-q", origin.to_str().unwrap(), "work"],
    );

    BaselineRepos {
        root,
        origin,
        work,
        fork_point,
    }
}
