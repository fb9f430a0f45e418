//! File system walker filtered by extension.

use crate::{ScanError, ScanOptions};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recursive walker that yields candidate source files.
pub struct Walker<'a> {
    root: PathBuf,
    options: &'a ScanOptions,
}

impl<'a> Walker<'a> {
    /// Create a new walker for the given root directory.
    pub fn new(root: &Path, options: &'a ScanOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
        }
    }

    /// Walk the directory tree and return every matching file.
    ///
    /// The first entry error aborts the walk. Results are sorted by path.
    pub fn walk(&self) -> Result<Vec<PathBuf>, ScanError> {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(self.options.follow_symlinks)
            .git_ignore(self.options.respect_gitignore)
            .git_exclude(self.options.respect_gitignore)
            .ignore(self.options.respect_gitignore)
            .parents(self.options.respect_gitignore)
            .require_git(false)
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = result.map_err(|source| ScanError::Discovery {
                root: self.root.clone(),
                source,
            })?;

            if !is_candidate_file(&entry) {
                continue;
            }

            let matched = self
                .options
                .matches_extension(&entry.file_name().to_string_lossy());
            if matched {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!(root = ?self.root, count = files.len(), "Files discovered");

        Ok(files)
    }
}

/// Regular files, plus unfollowed symlinks that do not point at a directory.
///
/// A dangling link is kept; opening it fails later and the file is skipped.
fn is_candidate_file(entry: &ignore::DirEntry) -> bool {
    let Some(ft) = entry.file_type() else {
        return false;
    };
    if ft.is_file() {
        return true;
    }
    if !ft.is_symlink() {
        return false;
    }
    match std::fs::metadata(entry.path()) {
        Ok(meta) => meta.is_file(),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> Vec<&str> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_walker_empty_directory() {
        let temp_dir = tempdir().unwrap();
        let opts = ScanOptions::default();

        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_walker_filters_by_extension() {
        let temp_dir = tempdir().unwrap();

        File::create(temp_dir.path().join("main.go")).unwrap();
        File::create(temp_dir.path().join("README.md")).unwrap();
        File::create(temp_dir.path().join("main.gox")).unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(names(&files), vec!["main.go"]);
    }

    #[test]
    fn test_walker_handles_nested_directories() {
        let temp_dir = tempdir().unwrap();

        fs::create_dir_all(temp_dir.path().join("a/b/c")).unwrap();
        File::create(temp_dir.path().join("a/one.go")).unwrap();
        File::create(temp_dir.path().join("a/b/two.go")).unwrap();
        File::create(temp_dir.path().join("a/b/c/three.go")).unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_walker_skips_directories_with_matching_names() {
        let temp_dir = tempdir().unwrap();

        fs::create_dir(temp_dir.path().join("pkg.go")).unwrap();
        File::create(temp_dir.path().join("pkg.go/inner.go")).unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(names(&files), vec!["inner.go"]);
    }

    #[test]
    fn test_walker_includes_hidden_files_by_default() {
        let temp_dir = tempdir().unwrap();

        fs::create_dir(temp_dir.path().join(".hidden")).unwrap();
        File::create(temp_dir.path().join(".hidden/x.go")).unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(names(&files), vec!["x.go"]);
    }

    #[test]
    fn test_walker_gitignore_is_opt_in() {
        let temp_dir = tempdir().unwrap();

        fs::write(temp_dir.path().join(".gitignore"), "vendor/\n").unwrap();
        fs::create_dir(temp_dir.path().join("vendor")).unwrap();
        File::create(temp_dir.path().join("vendor/dep.go")).unwrap();
        File::create(temp_dir.path().join("main.go")).unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();
        assert_eq!(files.len(), 2);

        let opts = ScanOptions {
            respect_gitignore: true,
            ..Default::default()
        };
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();
        assert_eq!(names(&files), vec!["main.go"]);
    }

    #[test]
    fn test_walker_missing_root_is_error() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let opts = ScanOptions::default();
        let err = Walker::new(&missing, &opts).walk().unwrap_err();

        assert!(matches!(err, ScanError::Discovery { .. }));
    }

    #[test]
    fn test_walker_results_are_sorted() {
        let temp_dir = tempdir().unwrap();

        File::create(temp_dir.path().join("c.go")).unwrap();
        File::create(temp_dir.path().join("a.go")).unwrap();
        File::create(temp_dir.path().join("b.go")).unwrap();

        let opts = ScanOptions::default();
        let first = Walker::new(temp_dir.path(), &opts).walk().unwrap();
        let second = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(names(&first), vec!["a.go", "b.go", "c.go"]);
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_includes_symlinked_files() {
        let temp_dir = tempdir().unwrap();

        fs::create_dir(temp_dir.path().join("real")).unwrap();
        fs::write(temp_dir.path().join("real/impl.txt"), "//go:build linux\n").unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("real/impl.txt"),
            temp_dir.path().join("link.go"),
        )
        .unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(names(&files), vec!["link.go"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_skips_symlinked_directories() {
        let temp_dir = tempdir().unwrap();

        fs::create_dir(temp_dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("real"),
            temp_dir.path().join("pkg.go"),
        )
        .unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_keeps_dangling_symlinks() {
        let temp_dir = tempdir().unwrap();

        std::os::unix::fs::symlink(
            temp_dir.path().join("nowhere.go"),
            temp_dir.path().join("dangling.go"),
        )
        .unwrap();

        let opts = ScanOptions::default();
        let files = Walker::new(temp_dir.path(), &opts).walk().unwrap();

        assert_eq!(names(&files), vec!["dangling.go"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_error_mid_tree_aborts() {
        let temp_dir = tempdir().unwrap();

        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        File::create(temp_dir.path().join("sub/ok.go")).unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("sub/nowhere"),
            temp_dir.path().join("sub/broken"),
        )
        .unwrap();

        let opts = ScanOptions {
            follow_symlinks: true,
            ..Default::default()
        };
        let err = Walker::new(temp_dir.path(), &opts).walk().unwrap_err();

        assert!(matches!(err, ScanError::Discovery { .. }));
    }
}
