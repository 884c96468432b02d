pub mod mercurial;
pub mod traits;

pub use mercurial::MercurialEngine;
pub use traits::{CommitRequest, VcsEngine};

use serde::Serialize;
use std::collections::BTreeSet;

/// File classification reported by the engine
///
/// Paths are relative to the repository root and use `/` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub added: BTreeSet<String>,
    /// Tracked files missing from the working copy (`!`)
    pub deleted: BTreeSet<String>,
    pub modified: BTreeSet<String>,
    /// Files scheduled for removal (`R`)
    pub removed: BTreeSet<String>,
    pub unknown: BTreeSet<String>,
}

impl StatusSnapshot {
    /// True when there is nothing a commit could record
    pub fn is_clean(&self) -> bool {
        self.added.is_empty()
            && self.deleted.is_empty()
            && self.modified.is_empty()
            && self.removed.is_empty()
    }

    /// Unknown files at `rel_path` or, for a directory, beneath it
    pub fn unknown_under<'a>(&'a self, rel_path: &'a str) -> impl Iterator<Item = &'a String> {
        self.unknown.iter().filter(move |p| {
            p.as_str() == rel_path
                || rel_path.is_empty()
                || (p.starts_with(rel_path) && p[rel_path.len()..].starts_with('/'))
        })
    }
}

/// File counts reported by the engine after switching revisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub updated: u64,
    pub merged: u64,
    pub removed: u64,
    pub unresolved: u64,
}
