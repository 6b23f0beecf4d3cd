use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixed "today" so outputs are deterministic.
pub const TODAY: &str = "19.10.2026";

/// Test harness running the binary in a scratch directory with a pinned date
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    /// Create a new test harness with an empty working directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
        cmd.current_dir(self.temp_dir.path())
            .env("CADENCE_TODAY", TODAY)
            .env_remove("CADENCE_ENGINE__HORIZON_YEARS")
            .env_remove("CADENCE_PREVIEW__COUNT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a `cadence.toml` into the working directory
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join("cadence.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common assertions
pub mod assertions {
    use super::*;

    pub fn prints_line(line: &str) -> impl Predicate<str> {
        predicate::str::diff(format!("{line}\n"))
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error:")
    }
}
