/// Mercurial (hg) engine implementation
/// Drives the `hg` executable with `HGPLAIN=1` so output stays parseable
use crate::config::HugConfig;
use crate::errors::{HugError, Result};
use crate::vcs::traits::{CommitRequest, VcsEngine};
use crate::vcs::{StatusSnapshot, UpdateOutcome};
use regex::Regex;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

/// `hg commit` exits with 1 when there was nothing to record
const EXIT_NOTHING_CHANGED: i32 = 1;

/// An engine session backed by the `hg` executable
#[derive(Debug, Clone)]
pub struct MercurialEngine {
    binary: PathBuf,
    env: BTreeMap<String, String>,
}

impl Default for MercurialEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MercurialEngine {
    pub fn new() -> Self {
        Self::from_config(&HugConfig::default())
    }

    pub fn from_config(config: &HugConfig) -> Self {
        Self {
            binary: config.hg_binary.clone(),
            env: config.env.clone(),
        }
    }

    /// Set an environment variable for every `hg` invocation
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Command running in `root`, without selecting a repository
    fn base_command(&self, root: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.current_dir(root).env("HGPLAIN", "1");
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Command bound to the repository at exactly `root`
    fn repo_command(&self, root: &Path) -> Command {
        let mut cmd = self.base_command(root);
        cmd.arg("--repository").arg(root);
        cmd
    }

    fn run(&self, mut cmd: Command) -> Result<Output> {
        tracing::debug!(command = ?cmd, "running hg");

        let output = cmd.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                HugError::HgNotFound(self.binary.display().to_string())
            } else {
                HugError::Io(e)
            }
        })?;

        tracing::debug!(status = ?output.status, "hg finished");
        Ok(output)
    }

    /// Run and return stdout, failing on a non-zero exit
    fn run_checked(&self, cmd: Command, what: &str) -> Result<String> {
        let output = self.run(cmd)?;
        if !output.status.success() {
            return Err(command_failed(what, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Effective value of an environment variable as `hg` will see it
    fn env_value(&self, key: &str) -> Option<String> {
        let value = match self.env.get(key) {
            Some(value) => value.clone(),
            None => std::env::var(key).ok()?,
        };
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn current_node(&self, root: &Path) -> Result<String> {
        let mut cmd = self.repo_command(root);
        cmd.args(["log", "--rev", ".", "--template", "{node}"]);
        let node = self.run_checked(cmd, "Failed to read the working copy parent")?;
        Ok(node.trim().to_string())
    }
}

impl VcsEngine for MercurialEngine {
    fn is_repository(&self, root: &Path) -> Result<bool> {
        let mut cmd = self.repo_command(root);
        cmd.arg("root");
        Ok(self.run(cmd)?.status.success())
    }

    fn init(&self, root: &Path) -> Result<()> {
        let mut cmd = self.base_command(root);
        cmd.arg("init").arg(root);
        self.run_checked(cmd, "Failed to initialize Mercurial repository")?;
        Ok(())
    }

    fn status(&self, root: &Path) -> Result<StatusSnapshot> {
        let mut cmd = self.repo_command(root);
        // modified, added, removed, deleted, unknown
        cmd.args(["status", "-mardu"]);
        let stdout = self.run_checked(cmd, "Failed to get Mercurial status")?;
        Ok(parse_status(&stdout))
    }

    fn add(&self, root: &Path, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut cmd = self.repo_command(root);
        cmd.arg("add").arg("--").args(paths);
        self.run_checked(cmd, "Failed to add files")?;
        Ok(())
    }

    fn forget(&self, root: &Path, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut cmd = self.repo_command(root);
        cmd.arg("forget").arg("--").args(paths);
        self.run_checked(cmd, "Failed to forget files")?;
        Ok(())
    }

    fn commit(&self, root: &Path, request: &CommitRequest<'_>) -> Result<String> {
        let mut cmd = self.repo_command(root);
        cmd.arg("commit")
            .arg("--message")
            .arg(request.message)
            .arg("--user")
            .arg(request.user);

        if let Some(date) = &request.date {
            // Internal format: unix time and offset in seconds west of UTC
            cmd.arg("--date").arg(format!(
                "{} {}",
                date.timestamp(),
                -date.offset().local_minus_utc()
            ));
        }

        let output = self.run(cmd)?;
        if output.status.code() == Some(EXIT_NOTHING_CHANGED) {
            return Err(HugError::NothingToCommit);
        }
        if !output.status.success() {
            return Err(command_failed("Failed to commit", &output));
        }

        self.current_node(root)
    }

    fn summary(&self, root: &Path) -> Result<String> {
        let mut cmd = self.repo_command(root);
        cmd.arg("summary");
        self.run_checked(cmd, "Failed to get Mercurial summary")
    }

    fn update(
        &self,
        root: &Path,
        revision: Option<&str>,
        clean: bool,
        check: bool,
    ) -> Result<UpdateOutcome> {
        let mut cmd = self.repo_command(root);
        cmd.arg("update");
        if clean {
            cmd.arg("--clean");
        }
        if check {
            cmd.arg("--check");
        }
        if let Some(rev) = revision {
            cmd.arg("--rev").arg(rev);
        }

        let output = self.run(cmd)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("unknown revision") {
                return Err(HugError::UnknownRevision(
                    revision.unwrap_or("tip").to_string(),
                ));
            }
            return Err(command_failed("Failed to update working copy", &output));
        }

        Ok(parse_update_output(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    /// `HGUSER`, then `ui.username`, then `EMAIL`
    ///
    /// Unlike `hg`, an empty `HGUSER` does not end the search; it counts as
    /// unset so an isolated environment can still pick up the repository's
    /// `ui.username`.
    fn configured_username(&self, root: &Path) -> Option<String> {
        if let Some(user) = self.env_value("HGUSER") {
            return Some(user);
        }

        let mut cmd = self.repo_command(root);
        cmd.args(["config", "ui.username"]);
        match self.run(cmd) {
            Ok(output) if output.status.success() => {
                let user = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !user.is_empty() {
                    return Some(user);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "could not query ui.username"),
        }

        self.env_value("EMAIL")
    }
}

fn command_failed(what: &str, output: &Output) -> HugError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    HugError::CommandFailed(format!("{}: {}", what, stderr.trim()))
}

/// Parse `hg status` lines of the form `X path`
fn parse_status(stdout: &str) -> StatusSnapshot {
    let mut status = StatusSnapshot::default();

    for line in stdout.lines() {
        let Some(path) = line.get(2..) else {
            continue;
        };
        // Backslash is an ordinary filename character outside Windows
        let path = if cfg!(windows) {
            path.replace('\\', "/")
        } else {
            path.to_string()
        };

        match line.chars().next() {
            Some('M') => status.modified.insert(path),
            Some('A') => status.added.insert(path),
            Some('R') => status.removed.insert(path),
            Some('!') => status.deleted.insert(path),
            Some('?') => status.unknown.insert(path),
            _ => false,
        };
    }

    status
}

/// Parse the counts line `hg update` prints
fn parse_update_output(stdout: &str) -> UpdateOutcome {
    static COUNTS: OnceLock<Regex> = OnceLock::new();
    let re = COUNTS.get_or_init(|| {
        Regex::new(
            r"(\d+) files updated, (\d+) files merged, (\d+) files removed, (\d+) files unresolved",
        )
        .expect("update counts pattern is valid")
    });

    let Some(caps) = re.captures(stdout) else {
        return UpdateOutcome::default();
    };
    let count = |i: usize| -> u64 { caps[i].parse().unwrap_or(0) };

    UpdateOutcome {
        updated: count(1),
        merged: count(2),
        removed: count(3),
        unresolved: count(4),
    }
}
