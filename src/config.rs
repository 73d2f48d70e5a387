//! Configuration management

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
}

/// How recorded commands are handed to the front end. Never affects the
/// argument line printed at the top of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Appended after the recorded flags
    pub extra_args: Vec<String>,
    /// Flags libclang rejects; a trailing `=` matches any value
    pub filtered_flags: Vec<String>,
    /// Let libclang print its diagnostics to stderr
    pub display_diagnostics: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            extra_args: vec![],
            filtered_flags: DEFAULT_FILTERED_FLAGS
                .iter()
                .map(|flag| flag.to_string())
                .collect(),
            display_diagnostics: false,
        }
    }
}

/// GCC-only flags found in kernel and embedded compile databases
const DEFAULT_FILTERED_FLAGS: &[&str] = &[
    "-fconserve-stack",
    "-fno-allow-store-data-races",
    "-fmin-function-alignment=",
    "-mindirect-branch-register",
    "-mindirect-branch=",
    "-mpreferred-stack-boundary=",
    "-mrecord-mcount",
    "-fno-var-tracking-assignments",
    "-fplugin=",
    "-fplugin-arg-",
];

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Option<PathBuf> {
        Self::home().map(|home| home.join("config.toml"))
    }

    /// `FIND_DECLS_HOME`, else the platform config directory
    pub fn home() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("FIND_DECLS_HOME") {
            return Some(PathBuf::from(home));
        }

        ProjectDirs::from("dev", "find-decls", "find-decls")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.parse.extra_args.is_empty());
        assert!(!config.parse.display_diagnostics);
        assert!(config
            .parse
            .filtered_flags
            .contains(&"-mpreferred-stack-boundary=".to_string()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[parse]\nextra_args = [\"-DANALYZING\"]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.parse.extra_args, vec!["-DANALYZING"]);
        assert!(!config.parse.filtered_flags.is_empty());
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[parse\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::TomlParse(_))));
    }
}
