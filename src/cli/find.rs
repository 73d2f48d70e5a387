//! The find command: database → command → parse → report.
//!
//! Stages run strictly in order and any of them can end the run:
//! reading the database, resolving the command, parsing, traversing.

use crate::cli::Cli;
use crate::compdb::{resolve, BuildEntry, CompilationDatabase};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parse::args::frontend_args;
use crate::parse::{ClangFrontend, Frontend};
use crate::walk::Reporter;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Run the find command against stdout with libclang
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let cwd = env::current_dir()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_with(&cli.compdb_dir, &cli.file, &cwd, config, &mut out, || {
        ClangFrontend::new(config.parse.display_diagnostics)
    })?;

    out.flush()?;
    Ok(())
}

/// Run the pipeline with an explicit working directory, output and front
/// end. The front end is only acquired once a command has been resolved.
/// Returns the number of report lines written.
pub fn run_with<F, W, A>(
    compdb_dir: &Path,
    file: &Path,
    cwd: &Path,
    config: &Config,
    out: &mut W,
    acquire_frontend: A,
) -> Result<usize>
where
    F: Frontend,
    W: Write,
    A: FnOnce() -> Result<F>,
{
    let entry = resolve_command(compdb_dir, file, cwd)?;
    info!(
        file = %file.display(),
        recorded = %entry.file.display(),
        directory = %entry.directory.display(),
        "Resolved compile command"
    );

    writeln!(out, "{}", entry.command_line())?;

    let args = frontend_args(&entry, &config.parse.filtered_flags, &config.parse.extra_args);
    let frontend = acquire_frontend()?;

    debug!("Traversing syntax tree");
    let reported = frontend.parse(file, &args, Reporter::new(out))??;

    info!(reported, "Traversal complete");
    Ok(reported)
}

/// Load the database and pick the entry for `file`. The database is
/// released before this returns; only the chosen entry survives.
fn resolve_command(compdb_dir: &Path, file: &Path, cwd: &Path) -> Result<BuildEntry> {
    debug!(dir = %compdb_dir.display(), "Reading compilation database");
    let database = CompilationDatabase::from_directory(compdb_dir).map_err(|err| {
        if let Error::DatabaseLoad { reason, .. } = &err {
            debug!(%reason, "Compilation database unusable");
        }
        err
    })?;

    if database.is_empty() {
        return Err(Error::NoEntries);
    }

    debug!(entries = database.entries().len(), "Resolving compile command");
    resolve(database.entries(), file, cwd)
        .cloned()
        .ok_or_else(|| Error::NoMatch {
            file: file.to_path_buf(),
        })
}
