//! CLI definition and the find command

pub mod find;

use clap::Parser;
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
List the functions, methods, lambdas and loops written in one C, C++ or
Objective-C source file, parsed by libclang with the exact flags recorded for
that file in compile_commands.json.

OUTPUT:
    Line 1       The recorded compiler command, space-joined
    Then         <kind>;<<file>:<line>:<col>, line:<line>:<col>>

    Constructs that come from included headers are never listed.

ENVIRONMENT:
    FIND_DECLS_LOG     Log filter (e.g. "debug"), logs go to stderr
    FIND_DECLS_HOME    Directory holding config.toml
    LIBCLANG_PATH      Directory to load libclang from
"#;

/// Locate declarations and loops in a source file
#[derive(Parser, Debug)]
#[command(name = "find-decls")]
#[command(author, version)]
#[command(about = "Locate declarations and loops in a source file using its compile command")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = "EXAMPLES:
    find-decls build src/widget.cpp
    find-decls . /abs/path/to/main.c")]
pub struct Cli {
    /// Directory containing compile_commands.json
    pub compdb_dir: PathBuf,

    /// Source file to analyze
    pub file: PathBuf,

    /// Anything after the source file is accepted and ignored
    #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}
