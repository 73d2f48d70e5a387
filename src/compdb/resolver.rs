use super::{BuildEntry, PathMatcher};
use std::path::Path;
use tracing::debug;

/// Find the build entry recorded for `target`.
///
/// Every entry is first compared by absolute path; only when none matches is
/// the relative comparison tried. Within a pass the first entry in recorded
/// order wins.
pub fn resolve<'a>(entries: &'a [BuildEntry], target: &Path, cwd: &Path) -> Option<&'a BuildEntry> {
    let matcher = PathMatcher::new(target, cwd);

    if let Some(entry) = entries.iter().find(|entry| matcher.matches_absolute(entry)) {
        debug!(file = %entry.file.display(), "Matched compile command by absolute path");
        return Some(entry);
    }

    let entry = entries.iter().find(|entry| matcher.matches_relative(entry))?;
    debug!(file = %entry.file.display(), "Matched compile command by relative path");
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(file: &str, directory: &str, marker: &str) -> BuildEntry {
        BuildEntry {
            file: PathBuf::from(file),
            directory: PathBuf::from(directory),
            arguments: vec!["clang++".to_string(), marker.to_string(), file.to_string()],
        }
    }

    #[test]
    fn test_absolute_entry_relative_request() {
        let entries = vec![
            entry("/project/src/other.cpp", "/project/build", "-DOTHER"),
            entry("/project/src/foo.cpp", "/project/build", "-DFOO"),
        ];

        for request in ["src/foo.cpp", "./src/foo.cpp", "src/../src/foo.cpp", "/project/src/foo.cpp"] {
            let found = resolve(&entries, Path::new(request), Path::new("/project"))
                .unwrap_or_else(|| panic!("{} did not resolve", request));
            assert_eq!(found.arguments[1], "-DFOO");
        }
    }

    #[test]
    fn test_falls_back_to_relative_pass() {
        // Recorded relative to a build dir that is not the process cwd: the
        // absolute pass lands in /elsewhere, the relative pass still matches.
        let entries = vec![entry("src/foo.cpp", "/elsewhere", "-DFOO")];
        let matcher = PathMatcher::new(Path::new("src/foo.cpp"), Path::new("/project"));
        assert!(!matcher.matches_absolute(&entries[0]));

        let found = resolve(&entries, Path::new("src/foo.cpp"), Path::new("/project"));
        assert_eq!(found, Some(&entries[0]));
    }

    #[test]
    fn test_absolute_pass_wins_over_earlier_relative_match() {
        let entries = vec![
            entry("src/foo.cpp", "/elsewhere", "-DRELATIVE"),
            entry("/project/src/foo.cpp", "/project", "-DABSOLUTE"),
        ];

        let found = resolve(&entries, Path::new("src/foo.cpp"), Path::new("/project")).unwrap();
        assert_eq!(found.arguments[1], "-DABSOLUTE");
    }

    #[test]
    fn test_first_match_wins() {
        let entries = vec![
            entry("foo.cpp", "/project", "-DFIRST"),
            entry("/project/foo.cpp", "/project", "-DSECOND"),
        ];

        let found = resolve(&entries, Path::new("foo.cpp"), Path::new("/project")).unwrap();
        assert_eq!(found.arguments[1], "-DFIRST");
    }

    #[test]
    fn test_no_match() {
        let entries = vec![
            entry("/project/src/a.cpp", "/project", "-DA"),
            entry("b.cpp", "/project", "-DB"),
        ];

        assert!(resolve(&entries, Path::new("src/c.cpp"), Path::new("/project")).is_none());
        assert!(resolve(&[], Path::new("a.cpp"), Path::new("/project")).is_none());
    }

    #[test]
    fn test_relative_pass_ignores_entry_directory_for_request() {
        // Known boundary: a database recorded on another machine only matches
        // through the relative pass, and that pass makes the request relative
        // to the process cwd. Run from the project root it matches; run from
        // inside src/ the same file is not found.
        let entries = vec![entry("src/foo.cpp", "/ci/checkout", "-DFOO")];

        let from_root = resolve(&entries, Path::new("src/foo.cpp"), Path::new("/home/dev/project"));
        assert!(from_root.is_some());

        let from_src = resolve(&entries, Path::new("foo.cpp"), Path::new("/home/dev/project/src"));
        assert!(from_src.is_none());
    }
}
