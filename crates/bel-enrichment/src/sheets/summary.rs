//! Outcome and error-type tables across many curated sheets.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use tracing::{info, warn};

use crate::error::{EnrichmentError, Result};

use super::listing::SheetListing;
use super::outcome::{OutcomeClassifier, OutcomeCounts};
use super::table::{SheetReader, SheetTable};

/// Column holding free-text error tags.
pub const ERROR_TYPE_COLUMN: &str = "Error Type";

/// Count comma-separated error tags, lowercased and trimmed.
pub fn count_error_types(table: &SheetTable, placeholder_evidence: &str) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for (_, row) in table.iter_rows() {
        if row.get("Evidence").is_some_and(|e| e == placeholder_evidence) {
            continue;
        }
        let Some(cell) = row.value(ERROR_TYPE_COLUMN) else {
            continue;
        };
        for label in cell.split(',') {
            let label = label.trim().to_lowercase();
            if !label.is_empty() {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Per-unit outcome and error-type tables.
#[derive(Debug, Clone, Default)]
pub struct CurationSummary {
    pub outcomes: IndexMap<String, OutcomeCounts>,
    pub error_types: IndexMap<String, IndexMap<String, usize>>,
}

impl CurationSummary {
    /// Every error label seen, in first-seen order.
    pub fn error_labels(&self) -> IndexSet<&str> {
        self.error_types
            .values()
            .flat_map(|counts| counts.keys().map(String::as_str))
            .collect()
    }

    /// Outcome table, one row per curation unit.
    pub fn write_outcomes<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let labels: Vec<&str> = OutcomeCounts::default().to_columns().keys().copied().collect();
        let mut header = vec![""];
        header.extend(&labels);
        csv.write_record(&header)?;

        for (unit, counts) in &self.outcomes {
            let mut record = vec![unit.clone()];
            record.extend(counts.to_columns().values().map(|n| n.to_string()));
            csv.write_record(&record)?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Error-type table; absent labels are written as zero.
    pub fn write_error_types<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let labels = self.error_labels();

        let mut header = vec![""];
        header.extend(labels.iter().copied());
        csv.write_record(&header)?;

        for (unit, counts) in &self.error_types {
            let mut record = vec![unit.clone()];
            record.extend(
                labels
                    .iter()
                    .map(|l| counts.get(*l).copied().unwrap_or(0).to_string()),
            );
            csv.write_record(&record)?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write both tables to files.
    pub fn save(&self, outcomes_path: &Path, error_types_path: &Path) -> Result<()> {
        for path in [outcomes_path, error_types_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| EnrichmentError::io(parent, e))?;
                }
            }
        }

        let file = File::create(outcomes_path).map_err(|e| EnrichmentError::io(outcomes_path, e))?;
        self.write_outcomes(file)?;
        let file =
            File::create(error_types_path).map_err(|e| EnrichmentError::io(error_types_path, e))?;
        self.write_error_types(file)?;

        info!(
            outcomes = %outcomes_path.display(),
            error_types = %error_types_path.display(),
            "curation summary written"
        );
        Ok(())
    }
}

/// Builds a [`CurationSummary`] from every listed sheet.
#[derive(Debug, Clone)]
pub struct CurationSummaryAggregator {
    reader: SheetReader,
    classifier: OutcomeClassifier,
}

impl CurationSummaryAggregator {
    pub fn new(reader: SheetReader, classifier: OutcomeClassifier) -> Self {
        Self { reader, classifier }
    }

    /// Summarize all sheets. Unreadable or malformed sheets are skipped.
    pub fn summarize(&self, listing: &dyn SheetListing) -> Result<CurationSummary> {
        let mut summary = CurationSummary::default();

        for (unit, path) in listing.sheets()? {
            let table = match self.reader.read(&path) {
                Ok((table, _)) => table,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable sheet");
                    continue;
                }
            };
            let counts = match self.classifier.classify_sheet(&table, &path) {
                Ok(counts) => counts,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping sheet");
                    continue;
                }
            };

            summary
                .outcomes
                .entry(unit.clone())
                .or_default()
                .merge(&counts);

            let errors = summary.error_types.entry(unit).or_default();
            for (label, n) in count_error_types(&table, self.classifier.placeholder_evidence()) {
                *errors.entry(label).or_insert(0) += n;
            }
        }

        Ok(summary)
    }
}
