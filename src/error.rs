//! Error types for find-decls

use crate::parse::ParseFailure;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using find-decls' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a run can fail. All of them end the process with exit code 1;
/// only the message tells them apart.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "error: too few arguments provided.\nMust provide path to directory containing compile_commands.json, and path to source file"
    )]
    Usage,

    #[error("Failed to open compile_commands.json in {}", dir.display())]
    DatabaseLoad { dir: PathBuf, reason: String },

    #[error("No compile commands found in compile_commands.json")]
    NoEntries,

    #[error("No compile command found for {}", file.display())]
    NoMatch { file: PathBuf },

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error("error: unable to load libclang: {message}")]
    FrontendUnavailable { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
