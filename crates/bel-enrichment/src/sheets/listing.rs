//! Discovery of curation sheets.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::{EnrichmentError, Result};

/// Lists curation sheets as `(identifier, path)` pairs.
pub trait SheetListing {
    fn sheets(&self) -> Result<Vec<(String, PathBuf)>>;
}

impl SheetListing for Vec<(String, PathBuf)> {
    fn sheets(&self) -> Result<Vec<(String, PathBuf)>> {
        Ok(self.clone())
    }
}

/// Finds sheets under a directory by file suffix; the parent folder names the
/// curation unit.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    root: PathBuf,
    suffix: String,
}

impl DirectoryListing {
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn matches(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.ends_with(&self.suffix))
    }
}

impl SheetListing for DirectoryListing {
    fn sheets(&self) -> Result<Vec<(String, PathBuf)>> {
        fs::metadata(&self.root).map_err(|e| EnrichmentError::io(&self.root, e))?;

        // symlinked directories and sheets are not followed
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        let mut paths = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if self.matches(&entry) => paths.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "skipping unreadable entry"),
            }
        }
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|path| (identifier_for(&path), path))
            .collect())
    }
}

/// Name of the folder holding a sheet, falling back to the file stem.
fn identifier_for(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .or_else(|| path.file_stem())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
