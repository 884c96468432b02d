// Library interface for hug
// A thin wrapper around select Mercurial functionality

pub mod cli;
pub mod config;
pub mod errors;
pub mod repo;
pub mod suggestions;
pub mod summary;
pub mod vcs;

pub use config::HugConfig;
pub use errors::{HugError, Result};
pub use repo::{Hug, DEFAULT_COMMIT_MESSAGE, DEFAULT_USERNAME};
pub use summary::Summary;
pub use vcs::{StatusSnapshot, UpdateOutcome};

/// Safely shorten a changeset id to 12 characters, the width `hg` uses
/// Returns the full id if it's shorter than 12 chars
pub fn short_node(node: &str) -> String {
    node.chars().take(12).collect()
}
