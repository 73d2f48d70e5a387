//! find-decls CLI entry point

use clap::error::ErrorKind;
use clap::Parser;
use find_decls::cli::{self, Cli};
use find_decls::{Config, Error};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("FIND_DECLS_LOG"))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return argument_error(err),
    };

    match Config::load().and_then(|config| cli::find::run(&cli, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Help and version exit cleanly; every other argument problem exits 1
fn argument_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        kind => {
            if kind == ErrorKind::MissingRequiredArgument {
                eprintln!("{}\n", Error::Usage);
            }
            let _ = err.print();
            ExitCode::FAILURE
        }
    }
}
