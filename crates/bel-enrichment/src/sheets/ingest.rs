//! Turning curated sheet rows into graph edges.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{EnrichmentError, Result};
use crate::graph::{CurationGraph, ParseContext, StatementParser, ANNOTATION_API};
use crate::relation::Citation;

use super::table::{SheetRow, SheetTable};

/// Confidence recorded on every re-curated statement.
pub const CURATED_CONFIDENCE: &str = "Medium";

/// Annotation keys written onto ingested edges.
pub const ANNOTATION_CURATOR: &str = "Curator";
pub const ANNOTATION_CONFIDENCE: &str = "Confidence";
pub const ANNOTATION_INDRA_UUID: &str = "INDRA_UUID";
pub const ANNOTATION_INDRA_BELIEF: &str = "INDRA_Belief";

/// Sheet columns mapped onto optional provenance annotations.
const PROVENANCE_COLUMNS: [(&[&str], &str); 3] = [
    (&["INDRA UUID", "UUID"], ANNOTATION_INDRA_UUID),
    (&["Belief"], ANNOTATION_INDRA_BELIEF),
    (&["API"], ANNOTATION_API),
];

/// What happened to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Checked was empty.
    Unchecked,
    /// Checked, but neither Correct nor Changed was set.
    Uncurated,
    /// Parsed into the graph.
    Added,
    /// The parser rejected the statement; a warning was recorded.
    Warned,
}

/// Per-sheet tally of row statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub unchecked: usize,
    pub uncurated: usize,
    pub added: usize,
    pub warned: usize,
}

impl IngestReport {
    fn record(&mut self, status: RowStatus) {
        match status {
            RowStatus::Unchecked => self.unchecked += 1,
            RowStatus::Uncurated => self.uncurated += 1,
            RowStatus::Added => self.added += 1,
            RowStatus::Warned => self.warned += 1,
        }
    }
}

/// Feeds curated rows through a statement parser into a graph.
pub struct SheetRowIngester<'p> {
    parser: &'p dyn StatementParser,
    path: Option<PathBuf>,
}

impl<'p> SheetRowIngester<'p> {
    pub fn new(parser: &'p dyn StatementParser) -> Self {
        Self { parser, path: None }
    }

    /// Tag warnings with the sheet they came from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Ingest one row. Only a row without any citation reference is an error.
    pub fn ingest(
        &self,
        row: &SheetRow<'_>,
        line_number: usize,
        graph: &mut CurationGraph,
    ) -> Result<RowStatus> {
        if !row.is_truthy("Checked") {
            return Ok(RowStatus::Unchecked);
        }
        if !row.is_truthy("Correct") && !row.is_truthy("Changed") {
            return Ok(RowStatus::Uncurated);
        }

        let reference = row
            .value("Citation Reference")
            .or_else(|| row.value("PMID"))
            .map(str::trim)
            .ok_or(EnrichmentError::MissingReference { line: line_number })?;

        let mut annotations = IndexMap::new();
        annotations.insert(
            ANNOTATION_CURATOR.to_string(),
            row.get("Curator").unwrap_or_default().to_string(),
        );
        annotations.insert(
            ANNOTATION_CONFIDENCE.to_string(),
            CURATED_CONFIDENCE.to_string(),
        );
        for (columns, key) in PROVENANCE_COLUMNS {
            if let Some(value) = columns.iter().find_map(|c| row.get(c)) {
                annotations.insert(key.to_string(), value.to_string());
            }
        }

        let context = ParseContext {
            citation: Citation::pubmed(reference),
            evidence: row.get("Evidence").unwrap_or_default().to_string(),
            annotations,
            line_number,
        };

        let text = format!(
            "{} {} {}",
            row.get("Subject").unwrap_or_default(),
            row.get("Predicate").unwrap_or_default(),
            row.get("Object").unwrap_or_default()
        );

        match self.parser.parse(&text, &context, graph) {
            Ok(()) => Ok(RowStatus::Added),
            Err(warning) => {
                debug!(line = line_number, %warning, "statement rejected by parser");
                graph.add_warning(self.path(), warning);
                Ok(RowStatus::Warned)
            }
        }
    }

    /// Ingest every row of a sheet in file order.
    pub fn ingest_table(&self, table: &SheetTable, graph: &mut CurationGraph) -> Result<IngestReport> {
        let mut report = IngestReport::default();
        for (line, row) in table.iter_rows() {
            report.record(self.ingest(&row, line, graph)?);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ParseWarning, RelationParser};

    const HEADERS: [&str; 12] = [
        "PMID", "Evidence", "Subject", "Predicate", "Object", "Curator", "Checked", "Correct",
        "Changed", "UUID", "API", "Belief",
    ];

    fn table(rows: &[[&str; 12]]) -> SheetTable {
        SheetTable::new(
            HEADERS.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn row(
        checked: &'static str,
        correct: &'static str,
        changed: &'static str,
        object: &'static str,
    ) -> [&'static str; 12] {
        [
            "123", "A activates B.", "p(HGNC:A)", "increases", object, "cth", checked, correct,
            changed, "u-1", "reach", "0.87",
        ]
    }

    #[test]
    fn test_curated_row_becomes_edge() {
        let table = table(&[row("x", "x", "", "p(HGNC:B)")]);
        let mut graph = CurationGraph::new();
        let parser = RelationParser::new();

        let report = SheetRowIngester::new(&parser)
            .ingest_table(&table, &mut graph)
            .unwrap();

        assert_eq!(report.added, 1);
        let edge = &graph.edges[0];
        assert_eq!(edge.citation, Some(Citation::pubmed("123")));
        assert_eq!(edge.evidence.as_deref(), Some("A activates B."));
        assert_eq!(edge.annotations["Curator"], "cth");
        assert_eq!(edge.annotations["Confidence"], "Medium");
        assert_eq!(edge.annotations["INDRA_UUID"], "u-1");
        assert_eq!(edge.annotations["INDRA_API"], "reach");
        assert_eq!(edge.annotations["INDRA_Belief"], "0.87");
        assert_eq!(edge.line, Some(2));
    }

    #[test]
    fn test_skips_unchecked_and_uncurated() {
        let table = table(&[
            row("", "x", "", "p(HGNC:B)"),
            row("x", "", "", "p(HGNC:B)"),
        ]);
        let mut graph = CurationGraph::new();
        let parser = RelationParser::new();

        let report = SheetRowIngester::new(&parser)
            .ingest_table(&table, &mut graph)
            .unwrap();

        assert_eq!(report.unchecked, 1);
        assert_eq!(report.uncurated, 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_bad_row_warns_and_continues() {
        let table = table(&[
            row("x", "", "x", "p(HGNC:B"),
            row("x", "x", "", "p(HGNC:C)"),
        ]);
        let mut graph = CurationGraph::new();
        let parser = RelationParser::new();

        let report = SheetRowIngester::new(&parser)
            .with_path("A/A.bel.tsv")
            .ingest_table(&table, &mut graph)
            .unwrap();

        assert_eq!(report.warned, 1);
        assert_eq!(report.added, 1);
        assert_eq!(graph.warnings.len(), 1);
        assert_eq!(graph.warnings[0].line, 2);
        assert_eq!(graph.warnings[0].path.as_deref(), Some(Path::new("A/A.bel.tsv")));
        assert!(matches!(graph.warnings[0].warning, ParseWarning::Syntax { .. }));
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let mut r = row("x", "x", "", "p(HGNC:B)");
        r[0] = "";
        let table = table(&[r]);
        let mut graph = CurationGraph::new();
        let parser = RelationParser::new();

        let result = SheetRowIngester::new(&parser).ingest_table(&table, &mut graph);
        assert!(matches!(result, Err(EnrichmentError::MissingReference { line: 2 })));
    }

    #[test]
    fn test_citation_reference_column_wins() {
        let headers: Vec<String> = [
            "Citation Reference", "PMID", "Checked", "Correct", "Subject", "Predicate", "Object",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let values: Vec<String> = ["999", "123", "x", "x", "p(HGNC:A)", "->", "p(HGNC:B)"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut graph = CurationGraph::new();
        let parser = RelationParser::new();

        SheetRowIngester::new(&parser)
            .ingest(&SheetRow::new(&headers, &values), 5, &mut graph)
            .unwrap();
        assert_eq!(graph.edges[0].citation, Some(Citation::pubmed("999")));
        assert!(!graph.edges[0].annotations.contains_key("INDRA_UUID"));
    }
}
