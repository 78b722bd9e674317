use std::process::ExitCode;

use clap::Parser;

use wsl_reclaim::cli::Cli;
use wsl_reclaim::commands;
use wsl_reclaim::config::Config;
use wsl_reclaim::error::ReclaimError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    tracing::debug!(?config, "Loaded configuration");

    match commands::reclaim::run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            // Missing prerequisites get their own exit code
            let fatal = e
                .downcast_ref::<ReclaimError>()
                .is_some_and(ReclaimError::is_fatal_precondition);
            ExitCode::from(if fatal { 2 } else { 1 })
        }
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wsl_reclaim={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
