//! Common test utilities for CLI integration tests.
//!
//! Provides a project directory with a config file and fake installs of the
//! engine packages, plus command builders pointed at it.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A config with two MongoDB processes; only `shared` shows logs.
pub const TWO_PROCESSES: &str = "\
processes:
  local:
    engine: mongodb
    serverPort: 4000
    clientPort: 5173
    databaseUrl: mongodb://localhost:27017/db
  shared:
    engine: mongodb
    serverPort: 4100
    clientPort: 5273
    databaseUrl: mongodb://db.internal:27017/shared
    showLogs: true
";

/// Isolated project directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the project directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty project directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Create a project with `videre.config.yaml` and both MongoDB packages installed.
    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        env.write_file("videre.config.yaml", config);
        env.install_package("@videre/mongo-server");
        env.install_package("@videre/mongo-app");
        env
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");
        cmd.env_remove("VIDERE_DIR")
            .env_remove("VIDERE_LOG_MODE")
            .env_remove("NODE_PATH");
        cmd
    }

    /// Get a command builder with `--dir` pointing at this project.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--dir").arg(&self.temp_path);
        cmd
    }

    /// Get the project path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the project directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Install a fake npm package under `node_modules`.
    pub fn install_package(&self, package: &str) -> PathBuf {
        let dir = self.temp_path.join("node_modules").join(package);
        std::fs::create_dir_all(&dir).expect("Failed to create package directory");
        std::fs::write(dir.join("package.json"), "{}").expect("Failed to write package.json");
        dir
    }

    /// Run `start --dry-run` with extra args and parse the printed plan.
    pub fn dry_run(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .arg("start")
            .arg("--dry-run")
            .args(args)
            .output()
            .expect("Failed to run videre");
        assert!(
            output.status.success(),
            "dry run failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("dry run did not print JSON")
    }
}
