//! find-decls - list declarations and loops of one C-family source file
//!
//! Resolves the file's compile command from `compile_commands.json`, parses
//! it with libclang using those flags, and reports every function-like
//! declaration, lambda and loop written in that file.

pub mod cli;
pub mod compdb;
pub mod config;
pub mod error;
pub mod output;
pub mod parse;
pub mod walk;

pub use config::Config;
pub use error::{Error, Result};
