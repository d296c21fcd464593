//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Sample configuration files

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A JSON configuration used by most tests.
pub const SAMPLE_JSON: &str = r#"{
  "server": {"host": "localhost", "port": 8080, "timeout": "30 seconds"},
  "database": {"url": "postgres://localhost/app", "pool": {"size": 10}},
  "features": ["metrics", "tracing"]
}"#;

/// Test environment with an isolated directory for configuration files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the knobs binary.
    ///
    /// Environment variables read by the CLI are cleared so that the
    /// developer's shell cannot influence the outcome.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("knobs").expect("Failed to find knobs binary");
        cmd.env_remove("KNOBS_LOG_MODE")
            .env_remove("KNOBS_ENV_PREFIX")
            .env_remove("KNOBS_OUTPUT_FORMAT");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a configuration file and return its path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Write [`SAMPLE_JSON`] as `app.json` and return its path.
    pub fn sample(&self) -> PathBuf {
        self.write_config("app.json", SAMPLE_JSON)
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run knobs");

        assert!(
            output.status.success(),
            "knobs {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
