//! Common test utilities for hug integration tests
#![allow(dead_code)]

use hug::{Hug, HugConfig};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Return early from a test when `hg` is not installed
#[macro_export]
macro_rules! require_hg {
    () => {
        if !common::hg_available() {
            eprintln!("Skipping test: Mercurial not available");
            return;
        }
    };
}

/// Whether the `hg` executable can be run
pub fn hg_available() -> bool {
    Command::new("hg")
        .arg("version")
        .env("HGPLAIN", "1")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Environment that hides the user's own Mercurial configuration
pub fn isolated_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("HGRCPATH".to_string(), String::new());
    env.insert("HGUSER".to_string(), String::new());
    env.insert("EMAIL".to_string(), String::new());
    env
}

pub fn isolated_config() -> HugConfig {
    HugConfig {
        env: isolated_env(),
        ..Default::default()
    }
}

/// A temporary directory that may or may not become a repository
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub repo_path: PathBuf,
}

impl TestRepo {
    /// Create an empty directory for a repository
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Keep the repo in a subdirectory so the temp root can hold other files
        let repo_path = temp_dir.path().join("repo");
        std::fs::create_dir(&repo_path).expect("Failed to create repo directory");

        TestRepo {
            temp_dir,
            repo_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.repo_path
    }

    /// Open a handle over this directory with an isolated config
    pub fn open(&self) -> Hug {
        Hug::open_with_config(&self.repo_path, false, &isolated_config())
            .expect("Failed to open repository")
    }

    /// Write a file relative to the repository root
    pub fn write(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.repo_path.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, rel_path: &str) -> String {
        std::fs::read_to_string(self.repo_path.join(rel_path)).expect("Failed to read file")
    }

    /// Run raw `hg` in this directory, returning stdout
    pub fn hg(&self, args: &[&str]) -> String {
        let output = Command::new("hg")
            .args(args)
            .current_dir(&self.repo_path)
            .env("HGPLAIN", "1")
            .envs(isolated_env())
            .output()
            .expect("Failed to execute hg");

        assert!(
            output.status.success(),
            "hg {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Files `hg status` reports as added
    pub fn added(&self) -> Vec<String> {
        self.hg(&["status", "--added", "--no-status"])
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    /// Files `hg status` reports as unknown
    pub fn unknown(&self) -> Vec<String> {
        self.hg(&["status", "--unknown", "--no-status"])
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    /// Template output for a single revision
    pub fn log(&self, rev: &str, template: &str) -> String {
        self.hg(&["log", "--rev", rev, "--template", template])
    }

    pub fn commit_count(&self) -> usize {
        self.hg(&["log", "--template", "x\n"]).lines().count()
    }

    /// Set the repository-local identity
    pub fn set_repo_username(&self, username: &str) {
        let hgrc = self.repo_path.join(".hg").join("hgrc");
        std::fs::write(hgrc, format!("[ui]\nusername = {}\n", username))
            .expect("Failed to write hgrc");
    }

    /// Write a hug config file that isolates `hg` and return its path
    pub fn write_config(&self) -> PathBuf {
        let path = self.temp_dir.path().join("config.yml");
        let yaml = "env:\n  HGRCPATH: \"\"\n  HGUSER: \"\"\n  EMAIL: \"\"\n";
        std::fs::write(&path, yaml).expect("Failed to write config file");
        path
    }

    /// Run the hug binary against this repository
    pub fn hug(&self, args: &[&str]) -> CommandResult {
        let config = self.write_config();
        let output = Command::new(env!("CARGO_BIN_EXE_hug"))
            .arg("-R")
            .arg(&self.repo_path)
            .arg("--config")
            .arg(&config)
            .args(args)
            .output()
            .expect("Failed to execute hug command");

        CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code(),
        }
    }
}

/// Result of running a command
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl CommandResult {
    /// Assert the command succeeded
    pub fn assert_success(&self) {
        if !self.success {
            panic!(
                "Command failed:\nstdout: {}\nstderr: {}\nexit code: {:?}",
                self.stdout, self.stderr, self.exit_code
            );
        }
    }

    /// Assert the command failed
    pub fn assert_failure(&self) {
        if self.success {
            panic!(
                "Command succeeded when it should have failed:\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
    }

    /// Assert stdout contains text
    pub fn assert_stdout_contains(&self, text: &str) {
        assert!(
            self.stdout.contains(text),
            "stdout does not contain '{}'\nstdout: {}",
            text,
            self.stdout
        );
    }

    /// Assert stderr contains text
    pub fn assert_stderr_contains(&self, text: &str) {
        assert!(
            self.stderr.contains(text),
            "stderr does not contain '{}'\nstderr: {}",
            text,
            self.stderr
        );
    }
}
