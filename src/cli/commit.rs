use crate::cli::open_repo;
use crate::config::HugConfig;
use crate::errors::Result;
use crate::short_node;
use chrono::{DateTime, FixedOffset};
use std::path::Path;

pub fn run(
    repo_dir: &Path,
    message: Option<String>,
    date: Option<DateTime<FixedOffset>>,
    user: Option<String>,
    config: &HugConfig,
) -> Result<()> {
    let mut hug = open_repo(repo_dir, config)?;
    if let Some(user) = user {
        hug.set_username(user);
    }

    let node = hug.commit(message.as_deref(), date)?;
    println!("Committed {} as {}", short_node(&node), hug.username());

    Ok(())
}
