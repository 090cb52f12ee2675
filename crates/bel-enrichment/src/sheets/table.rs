//! Reading curated sheets with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::{EnrichmentError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Columns every curated sheet must have.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Curator", "Checked", "Correct", "Changed"];

/// Sheet reader configuration.
#[derive(Debug, Clone)]
pub struct SheetReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for SheetReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Where a sheet came from.
#[derive(Debug, Clone)]
pub struct SheetSource {
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    pub delimiter: u8,
}

/// A curated sheet held in memory.
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major), padded to the header width.
    pub rows: Vec<Vec<String>>,
    /// Physical line each row starts on, when read from a file.
    lines: Vec<usize>,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            lines: Vec::new(),
        }
    }

    /// Record the physical line each row starts on.
    pub fn with_lines(mut self, lines: Vec<usize>) -> Self {
        self.lines = lines;
        self
    }

    /// 1-based line the row at `index` starts on. Without recorded lines,
    /// each row is assumed to take one line after the header.
    pub fn line_of(&self, index: usize) -> usize {
        self.lines.get(index).copied().unwrap_or(index + 2)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// View of one row.
    pub fn row(&self, index: usize) -> Option<SheetRow<'_>> {
        self.rows.get(index).map(|values| SheetRow {
            headers: &self.headers,
            values,
        })
    }

    /// Rows with their 1-based physical line numbers (the header is line 1).
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, SheetRow<'_>)> {
        self.rows.iter().enumerate().map(|(i, values)| {
            (
                self.line_of(i),
                SheetRow {
                    headers: &self.headers,
                    values,
                },
            )
        })
    }

    /// Fail on the first required column that is absent.
    pub fn require_columns(&self, path: &Path, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(column) => {
                warn!(path = %path.display(), column, "sheet is missing a template column");
                Err(EnrichmentError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
            }
            None => Ok(()),
        }
    }
}

/// One row of a sheet, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> SheetRow<'a> {
    /// Build a row view over parallel header and value slices.
    pub fn new(headers: &'a [String], values: &'a [String]) -> Self {
        Self { headers, values }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Raw cell value; None when the column does not exist.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.values.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Cell value unless the column is absent or the cell is null.
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.get(name).filter(|v| !is_null_value(v))
    }

    /// Whether the cell holds anything at all.
    pub fn is_marked(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Whether the cell holds a value that is not an explicit "no".
    pub fn is_truthy(&self, name: &str) -> bool {
        self.value(name).is_some_and(|v| {
            let v = v.trim();
            !(v == "0"
                || v.eq_ignore_ascii_case("false")
                || v.eq_ignore_ascii_case("no")
                || v.eq_ignore_ascii_case("n"))
        })
    }
}

/// Check if a value represents a missing/null cell.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Reads curated sheets from disk.
#[derive(Debug, Clone, Default)]
pub struct SheetReader {
    config: SheetReaderConfig,
}

impl SheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SheetReaderConfig) -> Self {
        Self { config }
    }

    /// Read a sheet and describe its source.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<(SheetTable, SheetSource)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| EnrichmentError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;
        let source = SheetSource {
            path: path.to_path_buf(),
            hash,
            delimiter,
        };
        Ok((table, source))
    }

    /// Parse bytes with a known delimiter. A header with no rows is valid.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<SheetTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(EnrichmentError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();
        let mut lines = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(rows.len() + 2);
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(expected_cols, String::new());
            rows.push(row);
            lines.push(line);
        }

        Ok(SheetTable::new(headers, rows).with_lines(lines))
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(EnrichmentError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b'\t';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // consistent counts win, tabs break ties
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
