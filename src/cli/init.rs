use crate::config::HugConfig;
use crate::errors::Result;
use crate::repo::Hug;
use std::path::Path;

pub fn run(repo_dir: &Path, safe: bool, config: &HugConfig) -> Result<()> {
    let hug = Hug::open_with_config(repo_dir, safe, config)?;
    println!("{}", hug.repo_dir().display());
    Ok(())
}
