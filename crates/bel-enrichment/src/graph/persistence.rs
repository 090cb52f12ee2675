//! Persistence for curated graphs: MessagePack cache and JSON export.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{EnrichmentError, Result};

use super::graph::CurationGraph;

impl CurationGraph {
    /// Write the binary cache.
    pub fn save_cache(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;

        let bytes = rmp_serde::to_vec_named(self)
            .map_err(|e| EnrichmentError::Cache(format!("Failed to encode graph: {}", e)))?;
        fs::write(path, bytes).map_err(|e| EnrichmentError::io(path, e))
    }

    /// Read the binary cache.
    pub fn load_cache(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| EnrichmentError::io(path, e))?;
        rmp_serde::from_slice(&bytes).map_err(|e| {
            EnrichmentError::Cache(format!(
                "Failed to decode graph '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Export the graph as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;

        let file = File::create(path).map_err(|e| EnrichmentError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a JSON export.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EnrichmentError::io(path, e))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Load a graph, choosing the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::load_json(path)
        } else {
            Self::load_cache(path)
        }
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| EnrichmentError::io(parent, e))?;
        }
    }
    Ok(())
}
