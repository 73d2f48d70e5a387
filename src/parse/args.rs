//! Turn a recorded compiler invocation into front-end arguments.
//!
//! The recorded list names the compiler and the source file; the front end
//! takes the file separately and wants neither. Include paths are rebased on
//! the entry's working directory because parsing runs from the process cwd.

use crate::compdb::{lexically_normal, BuildEntry};
use std::path::Path;

/// Flags whose value names a path, longest spelling first so joined forms
/// like `-isystemfoo` are not mistaken for `-I`
const PATH_FLAGS: &[&str] = &[
    "-include-pch",
    "-isystem",
    "-idirafter",
    "-include",
    "-iquote",
    "-I",
];

/// Forwards the next word to the front end's internal driver
const XCLANG: &str = "-Xclang";

/// Build the argument list handed to the front end for `entry`
pub fn frontend_args(entry: &BuildEntry, filtered_flags: &[String], extra_args: &[String]) -> Vec<String> {
    let source = lexically_normal(&entry.directory.join(&entry.file));
    let mut args = Vec::with_capacity(entry.arguments.len() + extra_args.len());

    let mut recorded = entry.arguments.iter().peekable();
    if recorded.peek().map_or(false, |first| !first.starts_with('-')) {
        recorded.next();
    }

    while let Some(arg) = recorded.next() {
        if is_filtered(arg, filtered_flags) {
            continue;
        }

        if PATH_FLAGS.contains(&arg.as_str()) {
            args.push(arg.clone());
            // `-Xclang -include -Xclang <path>`: the path sits behind a second -Xclang
            let mut value = recorded.next();
            if let Some(forward) = value.filter(|value| value.as_str() == XCLANG) {
                args.push(forward.clone());
                value = recorded.next();
            }
            if let Some(value) = value {
                args.push(rebase(value, &entry.directory));
            }
            continue;
        }

        if let Some((flag, value)) = split_joined_path_flag(arg) {
            args.push(format!("{}{}", flag, rebase(value, &entry.directory)));
            continue;
        }

        if !arg.starts_with('-') && lexically_normal(&entry.directory.join(arg)) == source {
            continue;
        }

        args.push(arg.clone());
    }

    args.extend(extra_args.iter().cloned());
    args
}

/// A filter ending in `=` matches any value of that flag
fn is_filtered(arg: &str, filtered_flags: &[String]) -> bool {
    filtered_flags.iter().any(|flag| {
        if flag.ends_with('=') {
            arg.starts_with(flag.as_str())
        } else {
            arg == flag
        }
    })
}

/// `-Ifoo` style flags. A value starting with `-` belongs to a different
/// flag that only shares the prefix (`-include-pch`, `-I-`).
fn split_joined_path_flag(arg: &str) -> Option<(&'static str, &str)> {
    PATH_FLAGS.iter().find_map(|flag| {
        arg.strip_prefix(flag)
            .filter(|value| !value.is_empty() && !value.starts_with('-'))
            .map(|value| (*flag, value))
    })
}

fn rebase(value: &str, directory: &Path) -> String {
    let path = Path::new(value);
    if path.is_absolute() {
        value.to_string()
    } else {
        directory.join(path).display().to_string()
    }
}
