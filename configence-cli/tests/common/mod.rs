//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - An isolated working directory holding schema and `.env` files
//! - Command builders that run the binary inside it

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Schema used by most tests. Keys carry a `CFG_CLI_` prefix so the
/// developer's environment cannot leak in.
#[allow(dead_code)]
pub const HERO_SCHEMA: &str = r#"
name: HeroConfig
prefix: CFG_CLI_
entries:
  - name: MY_HERO
    default: Son Goku
    description: The hero name
    flags: ["--hero", "-H"]
  - name: POWER_LEVEL
    type: int
    default: 9001
  - name: IS_STRONG
    type: bool
    default: false
  - name: EVENTS
    type: list
    default: [event1, event2]
  - name: SHOUT
    delay: "{MY_HERO} is over {POWER_LEVEL}"
"#;

/// Test environment with an isolated working directory.
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

    /// Get a command builder running in the test directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("configence").expect("Failed to find configence binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("CONFIGENCE_LOG_MODE")
            .env_remove("CONFIGENCE_ENV_FILE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file into the test directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write [`HERO_SCHEMA`] as `heroes.yaml`.
    pub fn hero_schema(&self) -> PathBuf {
        self.write("heroes.yaml", HERO_SCHEMA)
    }

    /// Run `resolve` on `schema` with extra arguments and parse the JSON
    /// output.
    pub fn resolve_json(&self, schema: &Path, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .arg("resolve")
            .arg(schema)
            .args(args)
            .output()
            .expect("Failed to run resolve");
        assert!(
            output.status.success(),
            "resolve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}
