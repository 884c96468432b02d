// Error suggestion system for better user experience
use crate::errors::HugError;
use colored::Colorize;

/// Display an error with helpful suggestions
pub fn display_error_with_suggestions(error: &HugError) {
    eprintln!("\n{}: {}", "Error".bright_red().bold(), error);

    match error {
        HugError::InvalidRepository(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • Check the path for typos");
            eprintln!(
                "  • Create the directory first: {}",
                "mkdir <dir>".bright_cyan()
            );
        }

        HugError::UnsafeInit(path) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • The directory has files but is not a Mercurial repository");
            eprintln!(
                "  • Initialize anyway: {}",
                format!("hug -R {} init", path.display()).bright_cyan()
            );
            eprintln!("  • Use an empty directory instead");
        }

        HugError::PathOutsideRepository(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • Only files inside the repository directory can be tracked");
            eprintln!("  • Relative paths are resolved against the repository root");
        }

        HugError::NothingToCommit => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!(
                "  • Track new files first: {}",
                "hug add <path>...".bright_cyan()
            );
            eprintln!("  • Check pending changes: {}", "hug summary".bright_cyan());
        }

        HugError::CorruptRepository(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • Verify the repository: {}", "hg verify".bright_cyan());
        }

        HugError::UnknownRevision(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • List known revisions: {}", "hg log".bright_cyan());
            eprintln!("  • Omit the revision to update to the branch tip");
        }

        HugError::HgNotFound(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • Install Mercurial and make sure {} is on PATH", "hg".bright_cyan());
            eprintln!("  • Or set {} in the hug config file", "hg_binary".bright_cyan());
        }

        HugError::CommandFailed(msg) if msg.contains("uncommitted changes") => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!(
                "  • Discard local changes: {}",
                "hug update --clean".bright_cyan()
            );
            eprintln!("  • Or commit them first: {}", "hug commit".bright_cyan());
        }

        _ => {}
    }
}
