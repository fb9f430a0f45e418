//! Tag aggregation across a directory tree.

use crate::extract::extract_tags_from_file;
use crate::walker::Walker;
use crate::{ScanError, ScanOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Deduplicated set of build tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag; returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Fold another set into this one.
    pub fn merge(&mut self, other: TagSet) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl Extend<String> for TagSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<String> for TagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of scanning a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root path that was scanned
    pub root: PathBuf,
    /// Every distinct tag found
    pub tags: TagSet,
    /// Files whose header was read
    pub files_scanned: usize,
    /// Files that could not be read
    pub files_skipped: usize,
    /// Scan duration in milliseconds
    pub duration_ms: u64,
}

impl ScanReport {
    pub fn files_discovered(&self) -> usize {
        self.files_scanned + self.files_skipped
    }
}

/// Walks a tree and unions the build tags of every matching file.
pub struct TagScanner {
    options: ScanOptions,
}

impl TagScanner {
    /// Create a scanner with default options (`.go` files, 512-byte prefix).
    pub fn new() -> Self {
        Self {
            options: ScanOptions::default(),
        }
    }

    /// Create a scanner with custom options.
    pub fn with_options(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan a directory tree.
    ///
    /// Discovery errors abort the scan. Unreadable files are logged and
    /// skipped.
    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        let start = Instant::now();

        info!(path = ?root, "Starting scan");

        let files = Walker::new(root, &self.options).walk()?;
        let (tags, skipped) = self.collect(&files);

        let duration = start.elapsed();

        info!(
            files = files.len(),
            skipped = skipped,
            tags = tags.len(),
            duration_ms = duration.as_millis(),
            "Scan complete"
        );

        Ok(ScanReport {
            root: root.to_path_buf(),
            tags,
            files_scanned: files.len() - skipped,
            files_skipped: skipped,
            duration_ms: duration.as_millis() as u64,
        })
    }

    /// Extract and union the tags of the given files.
    ///
    /// Returns the tag set and the number of files that could not be read.
    pub fn collect(&self, files: &[PathBuf]) -> (TagSet, usize) {
        let jobs = self.options.effective_jobs();
        if jobs <= 1 || files.len() <= 1 {
            return collect_sequential(files, self.options.prefix_size);
        }

        let chunk_size = files.len().div_ceil(jobs);
        let prefix_size = self.options.prefix_size;
        let (tx, rx) = mpsc::channel();

        std::thread::scope(|scope| {
            for chunk in files.chunks(chunk_size) {
                let tx = tx.clone();
                scope.spawn(move || {
                    let _ = tx.send(collect_sequential(chunk, prefix_size));
                });
            }
        });

        // Drop the original sender so the receiver knows when we're done
        drop(tx);

        let mut tags = TagSet::new();
        let mut skipped = 0;
        for (partial, partial_skipped) in rx {
            tags.merge(partial);
            skipped += partial_skipped;
        }
        (tags, skipped)
    }
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_sequential(files: &[PathBuf], prefix_size: usize) -> (TagSet, usize) {
    let mut tags = TagSet::new();
    let mut skipped = 0;

    for path in files {
        match extract_tags_from_file(path, prefix_size) {
            Ok(found) => {
                debug!(path = ?path, count = found.len(), "Extracted tags");
                tags.extend(found);
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "Skipping unreadable file");
                skipped += 1;
            }
        }
    }

    (tags, skipped)
}

/// Collect every build tag declared in `.go` files under `root`.
pub fn extract_build_tags_from_dir(root: &Path) -> Result<TagSet, ScanError> {
    TagScanner::new().scan(root).map(|report| report.tags)
}
