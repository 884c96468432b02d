/// Engine abstraction - the calls a repository handle makes into Mercurial
use crate::errors::Result;
use crate::vcs::{StatusSnapshot, UpdateOutcome};
use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};

/// Everything the engine needs to record a commit
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest<'a> {
    pub message: &'a str,
    pub user: &'a str,
    pub date: Option<DateTime<FixedOffset>>,
}

/// Trait that an engine session must implement
///
/// Every method takes the absolute repository root. Implementations open the
/// repository located exactly at `root` and never search parent directories.
pub trait VcsEngine {
    /// Whether a repository exists at `root`
    fn is_repository(&self, root: &Path) -> Result<bool>;

    /// Create a new, empty repository at `root`
    fn init(&self, root: &Path) -> Result<()>;

    /// Classify working-copy files
    fn status(&self, root: &Path) -> Result<StatusSnapshot>;

    /// Schedule untracked files for addition
    fn add(&self, root: &Path, paths: &[PathBuf]) -> Result<()>;

    /// Undo a pending addition
    fn forget(&self, root: &Path, paths: &[PathBuf]) -> Result<()>;

    /// Record a commit and return the new changeset id
    fn commit(&self, root: &Path, request: &CommitRequest<'_>) -> Result<String>;

    /// Raw text of the engine's summary report
    fn summary(&self, root: &Path) -> Result<String>;

    /// Switch the working copy to `revision` (branch tip when `None`)
    ///
    /// # Arguments
    /// * `clean` - Discard uncommitted changes
    /// * `check` - Abort when uncommitted changes exist
    fn update(
        &self,
        root: &Path,
        revision: Option<&str>,
        clean: bool,
        check: bool,
    ) -> Result<UpdateOutcome>;

    /// The identity the engine would commit as, if it has one
    ///
    /// Implementations may treat empty identity sources as absent where the
    /// engine itself would refuse to commit; `None` makes the handle use its
    /// fallback username.
    fn configured_username(&self, root: &Path) -> Option<String>;

    /// Check if the working copy has changes a commit could record
    fn has_uncommitted_changes(&self, root: &Path) -> Result<bool> {
        let status = self.status(root)?;
        Ok(!status.is_clean())
    }
}
