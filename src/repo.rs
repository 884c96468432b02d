//! The repository handle.
//!
//! [`Hug`] owns one repository root and its own engine session. All work is
//! delegated to the engine; the handle validates input, substitutes defaults
//! and shapes results.
//!
//! Handles are not meant to be shared between threads, and two handles over
//! the same directory are only as safe as Mercurial's own locking makes them.

use crate::config::HugConfig;
use crate::errors::{HugError, Result};
use crate::summary::Summary;
use crate::vcs::{CommitRequest, MercurialEngine, UpdateOutcome, VcsEngine};
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Commit message used when none is supplied
pub const DEFAULT_COMMIT_MESSAGE: &str = "(no commit message)";

/// Author used when no override is set and the engine has no identity
pub const DEFAULT_USERNAME: &str = "hug <hug@localhost>";

/// A Mercurial repository
pub struct Hug {
    repo_dir: PathBuf,
    engine: Box<dyn VcsEngine>,
    username: Option<String>,
    default_message: String,
    fallback_username: String,
}

impl Hug {
    /// Open the repository at `repo_dir`, initializing it if necessary
    ///
    /// With `safe` set, initialization is refused unless the directory is
    /// empty.
    pub fn open<P: AsRef<Path>>(repo_dir: P, safe: bool) -> Result<Self> {
        Self::open_with_config(repo_dir, safe, &HugConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        repo_dir: P,
        safe: bool,
        config: &HugConfig,
    ) -> Result<Self> {
        let engine = MercurialEngine::from_config(config);
        let mut hug = Self::with_engine(repo_dir, safe, Box::new(engine))?;
        hug.default_message = config.default_message.clone();
        hug.fallback_username = config.fallback_username.clone();
        Ok(hug)
    }

    /// Open with a caller-supplied engine session
    pub fn with_engine<P: AsRef<Path>>(
        repo_dir: P,
        safe: bool,
        engine: Box<dyn VcsEngine>,
    ) -> Result<Self> {
        let repo_dir = absolute(repo_dir.as_ref())?;

        if !repo_dir.is_dir() {
            return Err(HugError::InvalidRepository(repo_dir));
        }

        if !engine.is_repository(&repo_dir)? {
            if safe && fs::read_dir(&repo_dir)?.next().is_some() {
                return Err(HugError::UnsafeInit(repo_dir));
            }
            tracing::info!(path = %repo_dir.display(), "initializing repository");
            engine.init(&repo_dir)?;
        }

        Ok(Self {
            repo_dir,
            engine,
            username: None,
            default_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            fallback_username: DEFAULT_USERNAME.to_string(),
        })
    }

    /// Absolute path to the repository root
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// The author commits will be recorded with
    ///
    /// Order: the override set on this handle, the engine's configured
    /// identity, then the fallback username.
    pub fn username(&self) -> String {
        if let Some(user) = &self.username {
            return user.clone();
        }
        self.engine
            .configured_username(&self.repo_dir)
            .unwrap_or_else(|| self.fallback_username.clone())
    }

    pub fn username_override(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn clear_username(&mut self) {
        self.username = None;
    }

    /// Ensure every path is tracked
    ///
    /// Paths may be absolute or relative to the repository root. All paths are
    /// validated before anything is staged. Untracked paths are staged in one
    /// batch; if staging fails, the batch is forgotten again before the error
    /// is returned. Tracked paths are left alone.
    pub fn add<P: AsRef<Path>>(&self, pathnames: &[P]) -> Result<()> {
        let mut relative = Vec::with_capacity(pathnames.len());
        for pathname in pathnames {
            relative.push(self.repo_relative(pathname.as_ref())?);
        }

        if relative.is_empty() {
            return Ok(());
        }

        let status = self.engine.status(&self.repo_dir)?;
        let mut to_add: Vec<PathBuf> = Vec::new();
        for rel in &relative {
            for unknown in status.unknown_under(rel) {
                let path = self.repo_dir.join(unknown);
                if !to_add.contains(&path) {
                    to_add.push(path);
                }
            }
        }

        if to_add.is_empty() {
            tracing::debug!("all paths already tracked");
            return Ok(());
        }

        tracing::info!(count = to_add.len(), "staging untracked files");
        if let Err(e) = self.engine.add(&self.repo_dir, &to_add) {
            if let Err(forget_err) = self.engine.forget(&self.repo_dir, &to_add) {
                tracing::warn!(error = %forget_err, "could not roll back partial add");
            }
            return Err(e);
        }

        Ok(())
    }

    /// Make a new commit of the pending changes and return its changeset id
    ///
    /// Uses [`DEFAULT_COMMIT_MESSAGE`] (or the configured replacement) when no
    /// message is given, and [`Hug::username`] as the author.
    pub fn commit(
        &self,
        message: Option<&str>,
        date: Option<DateTime<FixedOffset>>,
    ) -> Result<String> {
        if !self.engine.has_uncommitted_changes(&self.repo_dir)? {
            return Err(HugError::NothingToCommit);
        }

        let user = self.username();
        let request = CommitRequest {
            message: message.unwrap_or(&self.default_message),
            user: &user,
            date,
        };

        let node = self.engine.commit(&self.repo_dir, &request)?;
        tracing::info!(node = %node, user = %user, "created commit");
        Ok(node)
    }

    /// Parsed summary of the working copy
    pub fn summary(&self) -> Result<Summary> {
        let output = self.engine.summary(&self.repo_dir)?;
        Summary::parse(&output)
    }

    /// Switch the working copy to `revision`, or the branch tip when `None`
    ///
    /// `clean` discards local changes; `check` refuses to update over them.
    pub fn update(&self, revision: Option<&str>, clean: bool, check: bool) -> Result<UpdateOutcome> {
        let outcome = self.engine.update(&self.repo_dir, revision, clean, check)?;
        tracing::info!(revision = revision.unwrap_or("tip"), ?outcome, "updated working copy");
        Ok(outcome)
    }

    /// Resolve `path` against the root and return it relative to the root
    ///
    /// The result uses `/` separators and is empty for the root itself.
    fn repo_relative(&self, path: &Path) -> Result<String> {
        let resolved = normalize(&self.repo_dir.join(path));
        let rel = resolved
            .strip_prefix(&self.repo_dir)
            .map_err(|_| HugError::PathOutsideRepository(path.to_path_buf()))?;

        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(parts.join("/"))
    }
}

impl fmt::Display for Hug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hug repository at {}", self.repo_dir.display())
    }
}

impl fmt::Debug for Hug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hug")
            .field("repo_dir", &self.repo_dir)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
