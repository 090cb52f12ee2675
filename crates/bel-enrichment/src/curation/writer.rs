//! Writing curation rows as a delimited sheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EnrichmentError, Result};

use super::row::{Row, END_HEADER, START_HEADER};

/// Serializes rows to a delimited table with the curation header.
#[derive(Debug, Clone)]
pub struct CurationSheetWriter {
    delimiter: u8,
    extra_columns: Vec<String>,
}

impl CurationSheetWriter {
    /// Create a tab-delimited writer with no extra columns.
    pub fn new() -> Self {
        Self {
            delimiter: b'\t',
            extra_columns: Vec::new(),
        }
    }

    /// Use a different delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Add blank columns for curators to fill in, placed between the
    /// statement columns and the provenance columns.
    pub fn with_extra_columns(mut self, columns: Vec<String>) -> Self {
        self.extra_columns = columns;
        self
    }

    /// The header line fields.
    pub fn header(&self) -> Vec<&str> {
        START_HEADER
            .iter()
            .copied()
            .chain(self.extra_columns.iter().map(String::as_str))
            .chain(END_HEADER.iter().copied())
            .collect()
    }

    /// Write rows in the given order. Returns the number of rows written.
    ///
    /// Nothing is written when `rows` is empty.
    pub fn write<W: Write>(&self, rows: &[Row], sink: W) -> Result<usize> {
        if rows.is_empty() {
            warn!("no rows written");
            return Ok(0);
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(sink);

        writer.write_record(self.header())?;

        let placeholders = vec![""; self.extra_columns.len()];
        for row in rows {
            let end = row.end_fields();
            let record = row
                .start_fields()
                .into_iter()
                .chain(placeholders.iter().copied())
                .chain(end.iter().map(String::as_str));
            writer.write_record(record)?;
        }

        writer
            .flush()
            .map_err(|e| EnrichmentError::Csv(csv::Error::from(e)))?;
        Ok(rows.len())
    }

    /// Write rows to a file, creating or truncating it.
    pub fn write_path(&self, rows: &[Row], path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();

        if rows.is_empty() {
            warn!(path = %path.display(), "no rows written");
            return Ok(0);
        }

        let file = File::create(path).map_err(|e| EnrichmentError::io(path, e))?;
        let written = self.write(rows, file)?;
        info!(rows = written, path = %path.display(), "wrote curation sheet");
        Ok(written)
    }
}

impl Default for CurationSheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pmid: &str, evidence: &str) -> Row {
        Row {
            uuid: "u1".to_string(),
            statement_hash: "h1".to_string(),
            evidence_hash: "e1".to_string(),
            api: "reach".to_string(),
            belief: 0.86,
            pmid: pmid.to_string(),
            evidence: evidence.to_string(),
            bel_subject: "p(HGNC:A)".to_string(),
            bel_relation: "increases".to_string(),
            bel_object: "p(HGNC:B)".to_string(),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let mut out = Vec::new();
        let written = CurationSheetWriter::new()
            .write(&[row("1", "A increases B."), row("2", "More.")], &mut out)
            .unwrap();

        assert_eq!(written, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "PMID\tEvidence\tSubject\tPredicate\tObject\tUUID\tStatement Hash\tEvidence Hash\tAPI\tBelief"
        );
        assert_eq!(
            lines[1],
            "1\tA increases B.\tp(HGNC:A)\tincreases\tp(HGNC:B)\tu1\th1\te1\treach\t0.86"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_extra_columns_are_blank() {
        let mut out = Vec::new();
        CurationSheetWriter::new()
            .with_delimiter(b',')
            .with_extra_columns(vec!["Checked".to_string(), "Correct".to_string()])
            .write(&[row("1", "x")], &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("PMID,Evidence,Subject,Predicate,Object,Checked,Correct,UUID"));
        assert!(lines[1].contains("p(HGNC:B),,,u1"));
    }

    #[test]
    fn test_evidence_with_quotes_or_delimiters_is_quoted() {
        let mut out = Vec::new();
        CurationSheetWriter::new()
            .write(
                &[
                    row("1", "A \"binds\" B."),
                    row("2", "A\tB"),
                    row("3", "first\nsecond"),
                ],
                &mut out,
            )
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n1\t\"A \"\"binds\"\" B.\"\tp(HGNC:A)"));
        assert!(text.contains("\n2\t\"A\tB\"\tp(HGNC:A)"));
        assert!(text.contains("\n3\t\"first\nsecond\"\tp(HGNC:A)"));

        // the sheet reader recovers the original text
        let table = crate::sheets::SheetReader::new()
            .parse_bytes(text.as_bytes(), b'\t')
            .unwrap();
        let evidence: Vec<&str> = table
            .iter_rows()
            .filter_map(|(_, r)| r.get("Evidence"))
            .collect();
        assert_eq!(evidence, vec!["A \"binds\" B.", "A\tB", "first\nsecond"]);
    }

    #[test]
    fn test_empty_rows_leave_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");

        let written = CurationSheetWriter::new().write_path(&[], &path).unwrap();

        assert_eq!(written, 0);
        assert!(!path.exists());
    }
}
