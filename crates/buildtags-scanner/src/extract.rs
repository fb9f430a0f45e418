//! Per-file tag extraction from a bounded header prefix.

use crate::directive::classify_line;
use crate::ScanError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Extract tags from the first `prefix_size` bytes of a file.
///
/// A file shorter than the prefix is read to its end without error.
pub fn extract_tags_from_file(path: &Path, prefix_size: usize) -> Result<Vec<String>, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::read(path, e))?;

    // `take` bounds the read; the buffer grows with what the file actually holds
    let mut buf = Vec::with_capacity(prefix_size.min(4096));
    file.take(prefix_size as u64)
        .read_to_end(&mut buf)
        .map_err(|e| ScanError::read(path, e))?;

    Ok(extract_tags_from_bytes(&buf))
}

/// Scan a header buffer line by line, stopping at the package clause.
pub fn extract_tags_from_bytes(buf: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(buf);

    let mut tags = Vec::new();
    for line in text.lines() {
        let directive = classify_line(line);
        if directive.is_package_clause() {
            break;
        }
        tags.extend(directive.tags());
    }
    tags
}
