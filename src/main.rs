use clap::Parser;
use hug::cli::{self, Cli};
use hug::suggestions::display_error_with_suggestions;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    if let Err(e) = cli::run(args) {
        display_error_with_suggestions(&e);
        std::process::exit(1);
    }
}
