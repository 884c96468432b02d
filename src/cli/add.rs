use crate::cli::open_repo;
use crate::config::HugConfig;
use crate::errors::Result;
use std::path::{Path, PathBuf};

pub fn run(repo_dir: &Path, paths: &[PathBuf], config: &HugConfig) -> Result<()> {
    let hug = open_repo(repo_dir, config)?;
    hug.add(paths)?;
    Ok(())
}
