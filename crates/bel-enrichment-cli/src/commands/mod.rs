//! CLI command implementations.

pub mod agents;
pub mod apis;
pub mod export;
pub mod ingest;
pub mod pmids;
pub mod rank;
pub mod summary;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bel_enrichment::ProcessOptions;

use crate::cli::SheetArgs;

/// Open the sheet destination, falling back to stdout.
pub fn open_sink(output: Option<&Path>) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Cannot create '{}': {}", path.display(), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Row processing options from the shared sheet flags.
pub fn process_options(sheet: &SheetArgs) -> ProcessOptions {
    let mut options = ProcessOptions::new()
        .with_allow_duplicates(sheet.allow_duplicates)
        .with_allow_ungrounded(!sheet.grounded_only)
        .with_limit(sheet.limit);
    if let Some(belief) = sheet.minimum_belief {
        options = options.with_minimum_belief(belief);
    }
    options
}
