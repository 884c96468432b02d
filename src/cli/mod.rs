pub mod add;
pub mod args;
pub mod commit;
pub mod completions;
pub mod init;
pub mod summary;
pub mod update;

pub use args::{Cli, Commands};

use crate::config::HugConfig;
use crate::errors::Result;
use crate::repo::Hug;
use std::path::Path;

/// Load the config named on the command line, or the default one
pub fn load_config(path: Option<&Path>) -> Result<HugConfig> {
    match path {
        Some(path) => HugConfig::load(path),
        None => HugConfig::load_default(),
    }
}

/// Open the repository for every command but `init`
///
/// Opening is safe: a non-empty directory that isn't a repository yet is
/// never initialized implicitly.
pub fn open_repo(repo_dir: &Path, config: &HugConfig) -> Result<Hug> {
    Hug::open_with_config(repo_dir, true, config)
}

pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        completions::run(shell);
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { safe } => init::run(&cli.repository, safe, &config),
        Commands::Add { paths } => add::run(&cli.repository, &paths, &config),
        Commands::Commit {
            message,
            date,
            user,
        } => commit::run(&cli.repository, message, date, user, &config),
        Commands::Summary { json } => summary::run(&cli.repository, json, &config),
        Commands::Update {
            revision,
            clean,
            check,
            json,
        } => update::run(&cli.repository, revision, clean, check, json, &config),
        Commands::Completions { .. } => Ok(()),
    }
}
