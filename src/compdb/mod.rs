//! Compilation Database
//!
//! Loads `compile_commands.json` and resolves which recorded build entry
//! belongs to the file under analysis.
//!
//! @module compdb

mod matcher;
mod resolver;

pub use matcher::{lexically_normal, lexically_relative, PathMatcher};
pub use resolver::resolve;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One recorded compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEntry {
    /// Source file, exactly as recorded (absolute or relative)
    pub file: PathBuf,
    /// Working directory the command was run from
    pub directory: PathBuf,
    /// Full compiler invocation, compiler executable first
    pub arguments: Vec<String>,
}

impl BuildEntry {
    /// The recorded argument list joined by single spaces, without re-quoting
    pub fn command_line(&self) -> String {
        self.arguments.join(" ")
    }
}

/// Entry as it appears on disk
#[derive(Debug, Deserialize)]
struct RawEntry {
    directory: String,
    file: String,
    #[serde(default)]
    arguments: Option<Vec<String>>,
    #[serde(default)]
    command: Option<String>,
}

impl RawEntry {
    fn into_entry(self) -> std::result::Result<BuildEntry, String> {
        let arguments = match (self.arguments, self.command) {
            (Some(arguments), _) => arguments,
            (None, Some(command)) => shell_words::split(&command)
                .map_err(|e| format!("cannot split command for {}: {}", self.file, e))?,
            (None, None) => {
                return Err(format!(
                    "entry for {} has neither 'arguments' nor 'command'",
                    self.file
                ))
            }
        };

        Ok(BuildEntry {
            file: PathBuf::from(self.file),
            directory: PathBuf::from(self.directory),
            arguments,
        })
    }
}

/// A loaded compilation database
#[derive(Debug, Clone, Default)]
pub struct CompilationDatabase {
    entries: Vec<BuildEntry>,
}

impl CompilationDatabase {
    pub const FILE_NAME: &'static str = "compile_commands.json";

    /// Load `compile_commands.json` from `dir`
    pub fn from_directory(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);
        let load_error = |reason: String| Error::DatabaseLoad {
            dir: dir.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| load_error(format!("{}: {}", path.display(), e)))?;
        let raw: Vec<RawEntry> =
            serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

        let entries = raw
            .into_iter()
            .map(RawEntry::into_entry)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(load_error)?;

        debug!(
            path = %path.display(),
            entries = entries.len(),
            "Loaded compilation database"
        );

        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<BuildEntry>) -> Self {
        Self { entries }
    }

    /// All recorded entries, in file order
    pub fn entries(&self) -> &[BuildEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
