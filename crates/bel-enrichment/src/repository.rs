//! A directory of curated sheets and the graph they add up to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{delimiter_byte, EnrichmentConfig};
use crate::error::Result;
use crate::graph::{CurationGraph, RelationParser, StatementParser};
use crate::sheets::{
    CurationSummary, CurationSummaryAggregator, DirectoryListing, EdgeTypeFilter,
    OutcomeClassifier, SheetListing, SheetReader, SheetReaderConfig, SheetRowIngester,
    REQUIRED_COLUMNS,
};

/// Curated sheets under one directory.
pub struct SheetsRepository {
    directory: PathBuf,
    output_directory: PathBuf,
    config: EnrichmentConfig,
    listing: Arc<dyn SheetListing>,
    parser: Arc<dyn StatementParser>,
}

impl SheetsRepository {
    /// Sheets are found by the configured suffix; outputs go next to them.
    pub fn new(directory: impl Into<PathBuf>, config: EnrichmentConfig) -> Self {
        let directory = directory.into();
        let listing = DirectoryListing::new(&directory, config.sheets.suffix.clone());
        Self {
            output_directory: directory.clone(),
            directory,
            config,
            listing: Arc::new(listing),
            parser: Arc::new(RelationParser::new()),
        }
    }

    pub fn with_output_directory(mut self, output_directory: impl Into<PathBuf>) -> Self {
        self.output_directory = output_directory.into();
        self
    }

    pub fn with_listing(mut self, listing: Arc<dyn SheetListing>) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn StatementParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn cache_path(&self) -> PathBuf {
        self.output_directory.join(&self.config.output.cache_name)
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_directory.join(&self.config.output.json_name)
    }

    fn reader(&self) -> Result<SheetReader> {
        let delimiter = self.config.sheets.delimiter.map(delimiter_byte).transpose()?;
        Ok(SheetReader::with_config(SheetReaderConfig {
            delimiter,
            ..Default::default()
        }))
    }

    /// Build the graph from every sheet, or load the cache when it exists.
    pub fn get_graph(&self, use_cached: bool) -> Result<CurationGraph> {
        let cache_path = self.cache_path();
        if use_cached && cache_path.exists() {
            info!(path = %cache_path.display(), "loading cached graph");
            return CurationGraph::load_cache(&cache_path);
        }

        let reader = self.reader()?;
        let mut graph = CurationGraph::new();

        for (unit, path) in self.listing.sheets()? {
            let (table, source) = match reader.read(&path) {
                Ok(read) => read,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable sheet");
                    continue;
                }
            };
            if table.require_columns(&path, &REQUIRED_COLUMNS).is_err() {
                continue;
            }

            graph.add_source(&path, source.hash);
            let report = SheetRowIngester::new(&*self.parser)
                .with_path(&path)
                .ingest_table(&table, &mut graph)?;
            debug!(
                unit = %unit,
                added = report.added,
                warned = report.warned,
                "ingested sheet"
            );
        }

        info!(
            sheets = graph.sources.len(),
            edges = graph.edge_count(),
            warnings = graph.warnings.len(),
            "graph assembled"
        );

        graph.save_cache(&cache_path)?;
        graph.save_json(self.json_path())?;
        Ok(graph)
    }

    /// Write outcome and error-type tables into the output directory.
    pub fn generate_curation_summary(
        &self,
        edge_type_filter: Option<EdgeTypeFilter>,
    ) -> Result<CurationSummary> {
        let classifier = OutcomeClassifier::new(self.config.sheets.placeholder_evidence.clone())
            .with_conflict_policy(self.config.sheets.conflict_policy)
            .with_edge_type_filter(edge_type_filter);
        let aggregator = CurationSummaryAggregator::new(self.reader()?, classifier);

        let summary = aggregator.summarize(self.listing.as_ref())?;
        summary.save(
            &self.output_directory.join(&self.config.output.summary_name),
            &self.output_directory.join(&self.config.output.error_types_name),
        )?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str =
        "PMID\tEvidence\tSubject\tPredicate\tObject\tCurator\tChecked\tCorrect\tChanged\n";

    fn write_sheet(root: &Path, unit: &str, body: &str) {
        let dir = root.join(unit);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.bel.tsv", unit)), format!("{}{}", HEADER, body)).unwrap();
    }

    #[test]
    fn test_get_graph_writes_cache_and_export() {
        let dir = tempfile::tempdir().unwrap();
        write_sheet(
            dir.path(),
            "AKT1",
            "1\tA up B.\tp(HGNC:AKT1)\tincreases\tp(HGNC:B)\tcth\tx\tx\t\n",
        );
        fs::create_dir_all(dir.path().join("BAD")).unwrap();
        fs::write(dir.path().join("BAD/BAD.bel.tsv"), "PMID\tEvidence\n1\tx\n").unwrap();

        let repo = SheetsRepository::new(dir.path(), EnrichmentConfig::default());
        let graph = repo.get_graph(true).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.sources.len(), 1);
        assert!(repo.cache_path().exists());
        assert!(repo.json_path().exists());
    }

    #[test]
    fn test_cache_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        write_sheet(
            dir.path(),
            "AKT1",
            "1\tA up B.\tp(HGNC:AKT1)\tincreases\tp(HGNC:B)\tcth\tx\tx\t\n",
        );
        let repo = SheetsRepository::new(dir.path(), EnrichmentConfig::default());
        repo.get_graph(true).unwrap();

        // the cache wins even after the sheet disappears
        fs::remove_dir_all(dir.path().join("AKT1")).unwrap();
        assert_eq!(repo.get_graph(true).unwrap().edge_count(), 1);
        assert_eq!(repo.get_graph(false).unwrap().edge_count(), 0);
    }

    #[test]
    fn test_generate_curation_summary() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_sheet(
            dir.path(),
            "MAPT",
            "1\ta\tp(A)\tincreases\tp(B)\tcth\tx\tx\t\n2\tb\tp(A)\tincreases\tp(C)\tcth\t\t\t\n",
        );

        let summary = SheetsRepository::new(dir.path(), EnrichmentConfig::default())
            .with_output_directory(out.path())
            .generate_curation_summary(None)
            .unwrap();

        assert_eq!(summary.outcomes["MAPT"].correct, 1);
        assert_eq!(summary.outcomes["MAPT"].not_curated, 1);
        assert!(out.path().join("curation_summary.csv").exists());
        assert!(out.path().join("error_types.csv").exists());
    }
}
