//! Lexical path matching between a requested file and recorded entries.
//!
//! Nothing here touches the filesystem: paths that do not exist compare the
//! same way as paths that do.

use super::BuildEntry;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` segments without consulting the filesystem.
///
/// `..` directly under the root is dropped; leading `..` of a relative path
/// are kept. An input that collapses to nothing becomes `.`.
pub fn lexically_normal(path: &Path) -> PathBuf {
    let mut prefix: Vec<Component> = Vec::new();
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => prefix.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else if prefix.is_empty() {
                    parts.push(component);
                }
            }
            Component::Normal(_) => parts.push(component),
        }
    }

    if prefix.is_empty() && parts.is_empty() {
        return if path.as_os_str().is_empty() {
            PathBuf::new()
        } else {
            PathBuf::from(".")
        };
    }

    prefix.iter().chain(parts.iter()).collect()
}

/// `path` expressed relative to `base`, both taken lexically.
///
/// Returns `None` when the two cannot be related (different roots, or `base`
/// climbs above its own start with `..`).
pub fn lexically_relative(path: &Path, base: &Path) -> Option<PathBuf> {
    let path = lexically_normal(path);
    let base = lexically_normal(base);

    if path.has_root() != base.has_root() {
        return None;
    }

    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut ups = 0usize;
    for component in &base_parts[common..] {
        match component {
            Component::Normal(_) => ups += 1,
            Component::CurDir => {}
            // Base walks above a point we cannot name, or the roots differ
            _ => return None,
        }
    }

    let mut relative: Vec<OsString> = Vec::with_capacity(ups + path_parts.len() - common);
    relative.extend(std::iter::repeat(OsString::from("..")).take(ups));
    relative.extend(
        path_parts[common..]
            .iter()
            .map(|component| component.as_os_str().to_os_string()),
    );

    if relative.is_empty() {
        return Some(PathBuf::from("."));
    }

    Some(relative.iter().collect())
}

/// `path` made absolute against `base` (no normalization)
fn absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Matches one requested file against recorded entries.
///
/// The requested path is prepared once, in both absolute and relative form,
/// against the process working directory.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    cwd: PathBuf,
    absolute: PathBuf,
    relative: Option<PathBuf>,
}

impl PathMatcher {
    pub fn new(target: &Path, cwd: &Path) -> Self {
        let absolute = lexically_normal(&absolute(target, cwd));

        let relative = if target.is_relative() {
            Some(lexically_normal(target))
        } else {
            lexically_relative(target, cwd)
        };

        Self {
            cwd: cwd.to_path_buf(),
            absolute,
            relative,
        }
    }

    /// Compare absolute forms. Relative entry files are anchored on their
    /// recorded directory, and a relative directory on the process cwd.
    pub fn matches_absolute(&self, entry: &BuildEntry) -> bool {
        let mut candidate = entry.file.clone();
        if !candidate.is_absolute() {
            candidate = entry.directory.join(candidate);
        }
        let candidate = absolute(&candidate, &self.cwd);

        lexically_normal(&candidate) == self.absolute
    }

    /// Compare relative forms. Absolute entry files are made relative to
    /// their recorded directory; the requested file was made relative to the
    /// process cwd, never to the entry's directory.
    pub fn matches_relative(&self, entry: &BuildEntry) -> bool {
        let Some(requested) = &self.relative else {
            return false;
        };

        let candidate = if entry.file.is_absolute() {
            let directory = absolute(&entry.directory, &self.cwd);
            match lexically_relative(&entry.file, &directory) {
                Some(relative) => relative,
                None => return false,
            }
        } else {
            lexically_normal(&entry.file)
        };

        &candidate == requested
    }
}
