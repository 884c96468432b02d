use crate::cli::open_repo;
use crate::config::HugConfig;
use crate::errors::Result;
use std::path::Path;

pub fn run(
    repo_dir: &Path,
    revision: Option<String>,
    clean: bool,
    check: bool,
    json: bool,
    config: &HugConfig,
) -> Result<()> {
    let hug = open_repo(repo_dir, config)?;
    let outcome = hug.update(revision.as_deref(), clean, check)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} files updated, {} files merged, {} files removed, {} files unresolved",
        outcome.updated, outcome.merged, outcome.removed, outcome.unresolved
    );

    Ok(())
}
