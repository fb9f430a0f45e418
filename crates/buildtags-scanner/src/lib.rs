//! buildtags scanner
//!
//! This crate collects the build constraints declared in Go file headers:
//! - Recursive file discovery filtered by extension
//! - Bounded-prefix header reads
//! - `//go:build` and `// +build` line classification
//! - Deduplication of tags across a whole tree

mod config;
mod error;
pub mod directive;
pub mod extract;
pub mod scanner;
pub mod walker;

pub use config::{default_config_path, ScanOptions, CONFIG_FILE_NAME};
pub use directive::{classify_line, Directive};
pub use error::ScanError;
pub use extract::{extract_tags_from_bytes, extract_tags_from_file};
pub use scanner::{extract_build_tags_from_dir, ScanReport, TagScanner, TagSet};
pub use walker::Walker;
