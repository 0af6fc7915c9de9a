//! Directory listing.
//!
//! Lists regular files only; deciding which of them are images is left to the
//! batch processor so that the eligible count is computed in one place.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Lists files in a directory in lexical path order.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    recursive: bool,
}

impl FileDiscovery {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            recursive: config.recursive,
        }
    }

    /// Override the configured recursion setting.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// List every regular file at `path`.
    ///
    /// A file path yields just itself. A directory yields its direct children
    /// (or all descendants when recursive), sorted by path. Unreadable entries
    /// are skipped with a warning.
    pub fn discover(&self, path: &Path) -> Vec<PathBuf> {
        if path.is_file() {
            return vec![path.to_path_buf()];
        }

        let mut walker = WalkDir::new(path).follow_links(true).min_depth(1);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }
}
