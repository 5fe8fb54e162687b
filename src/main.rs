use std::process::ExitCode;

use clap::Parser;
use keybundle::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

/// Environment variable with a `tracing` filter directive.
const LOG_ENV: &str = "KEYBUNDLE_LOG";

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match keybundle::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "keybundle=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
