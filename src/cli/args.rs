use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hug")]
#[command(about = "A wrapper for select Mercurial functionality", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Repository directory
    #[arg(short = 'R', long = "repository", global = true, default_value = ".")]
    pub repository: PathBuf,

    /// Config file (defaults to <config dir>/hug/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the repository, initializing it if necessary
    Init {
        /// Refuse to initialize a non-empty directory
        #[arg(long)]
        safe: bool,
    },
    /// Ensure files are tracked
    Add {
        /// Paths, absolute or relative to the repository root
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Commit pending changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
        /// Commit date (RFC 3339, e.g. 2016-05-01T12:00:00+02:00)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<DateTime<FixedOffset>>,
        /// Author, overriding the configured identity
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show the working copy summary
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch the working copy to another revision
    Update {
        /// Target revision (defaults to the branch tip)
        revision: Option<String>,
        /// Discard uncommitted changes
        #[arg(short = 'C', long)]
        clean: bool,
        /// Abort if there are uncommitted changes
        #[arg(short, long)]
        check: bool,
        /// Print the file counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_date(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid date '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commit_arguments() {
        let cli = Cli::try_parse_from([
            "hug",
            "-R",
            "/tmp/repo",
            "commit",
            "-m",
            "a message",
            "-d",
            "2016-05-01T12:00:00+02:00",
        ])
        .unwrap();

        assert_eq!(cli.repository, PathBuf::from("/tmp/repo"));
        match cli.command {
            Commands::Commit {
                message,
                date,
                user,
            } => {
                assert_eq!(message.as_deref(), Some("a message"));
                assert_eq!(date.unwrap().offset().local_minus_utc(), 7200);
                assert!(user.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Cli::try_parse_from(["hug", "commit", "-d", "yesterday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update_arguments() {
        let cli = Cli::try_parse_from(["hug", "update", "-C", "--json", "3"]).unwrap();

        match cli.command {
            Commands::Update {
                revision,
                clean,
                check,
                json,
            } => {
                assert_eq!(revision.as_deref(), Some("3"));
                assert!(clean);
                assert!(!check);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_paths() {
        assert!(Cli::try_parse_from(["hug", "add"]).is_err());
    }
}
