use crate::cli::open_repo;
use crate::config::HugConfig;
use crate::errors::Result;
use std::path::Path;

pub fn run(repo_dir: &Path, json: bool, config: &HugConfig) -> Result<()> {
    let hug = open_repo(repo_dir, config)?;
    let summary = hug.summary()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.to_map())?);
        return Ok(());
    }

    println!("{:<10} {}", "parent:", summary.parent);
    println!("{:<10} {}", "message:", summary.message);
    for (key, value) in &summary.fields {
        println!("{:<10} {}", format!("{}:", key), value);
    }

    Ok(())
}
