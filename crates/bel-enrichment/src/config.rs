//! Configuration loaded from TOML, with defaults for every field.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnrichmentError, Result};
use crate::sheets::ConflictPolicy;

/// Placeholder text the reading systems emit when no sentence was captured.
pub const NO_EVIDENCE_TEXT: &str = "No evidence text.";

/// Placeholder text for assertions rewritten by an upstream curator.
pub const MODIFIED_ASSERTION: &str = "Modified assertion";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Evidence and edge blacklists.
    pub filter: FilterConfig,
    /// Curation sheet reading and classification.
    pub sheets: SheetsConfig,
    /// Output file names and delimiters.
    pub output: OutputConfig,
    /// Statement retrieval service.
    pub retrieval: RetrievalConfig,
    /// Per-gene export defaults.
    pub export: ExportConfig,
}

impl EnrichmentConfig {
    /// Load a configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| EnrichmentError::io(path, e))?;
        Self::from_toml(&contents)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| EnrichmentError::Config(e.to_string()))
    }
}

/// Blacklists applied while projecting statements to rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Evidence texts that are placeholders rather than sentences.
    pub text_blacklist: BTreeSet<String>,
    /// Source APIs whose evidence is not worth re-curating.
    pub source_blacklist: BTreeSet<String>,
    /// Substrings marking edges with entities we cannot ground.
    pub substring_blacklist: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            text_blacklist: [NO_EVIDENCE_TEXT, MODIFIED_ASSERTION]
                .into_iter()
                .map(String::from)
                .collect(),
            source_blacklist: ["bel", "signor"].into_iter().map(String::from).collect(),
            substring_blacklist: vec!["CHEBI".to_string(), "PUBCHEM".to_string()],
        }
    }
}

/// How curated sheets are found, read, and classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// File name suffix identifying a curation sheet.
    pub suffix: String,
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Evidence text of rows excluded from the outcome report.
    pub placeholder_evidence: String,
    /// What to do with rows marked both correct and changed.
    pub conflict_policy: ConflictPolicy,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            suffix: ".tsv".to_string(),
            delimiter: None,
            placeholder_evidence: NO_EVIDENCE_TEXT.to_string(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

/// Output artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Delimiter for generated curation sheets.
    pub delimiter: char,
    /// File name of the cached graph.
    pub cache_name: String,
    /// File name of the JSON graph export.
    pub json_name: String,
    /// File name of the outcome summary table.
    pub summary_name: String,
    /// File name of the error type table.
    pub error_types_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            cache_name: "sheets.graph.msgpack".to_string(),
            json_name: "sheets.graph.json".to_string(),
            summary_name: "curation_summary.csv".to_string(),
            error_types_name: "error_types.csv".to_string(),
        }
    }
}

/// Statement retrieval service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Base URL of the statement database REST API.
    pub base_url: String,
    /// API key (falls back to `INDRA_DB_REST_API_KEY`).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://db.indra.bio".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

/// Defaults for exporting sheets around under-curated genes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Rank above which non-HGNC genes are still exported.
    pub minimum_information_density: f64,
    /// Statements below this belief are dropped.
    pub minimum_belief: f64,
    /// Maximum rows per sheet.
    pub limit: Option<usize>,
    /// Keep every evidence of a statement instead of the first.
    pub allow_duplicates: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            minimum_information_density: 1.0,
            minimum_belief: 0.3,
            limit: None,
            allow_duplicates: false,
        }
    }
}

/// Convert a configured delimiter character into a byte.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or_else(|| EnrichmentError::Config(format!("Delimiter must be ASCII: {:?}", delimiter)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnrichmentConfig::default();
        assert!(config.filter.text_blacklist.contains(NO_EVIDENCE_TEXT));
        assert!(config.filter.source_blacklist.contains("signor"));
        assert_eq!(config.sheets.suffix, ".tsv");
        assert_eq!(config.output.delimiter, '\t');
        assert_eq!(config.sheets.conflict_policy, ConflictPolicy::Exclude);
    }

    #[test]
    fn test_partial_toml() {
        let config = EnrichmentConfig::from_toml(
            r#"
            [sheets]
            suffix = ".curated.tsv"
            conflict_policy = "error_but_other_statement"

            [filter]
            source_blacklist = ["biopax"]
            "#,
        )
        .unwrap();

        assert_eq!(config.sheets.suffix, ".curated.tsv");
        assert_eq!(
            config.sheets.conflict_policy,
            ConflictPolicy::ErrorButOtherStatement
        );
        assert!(config.filter.source_blacklist.contains("biopax"));
        assert!(!config.filter.source_blacklist.contains("bel"));
        // untouched sections keep defaults
        assert_eq!(config.output.summary_name, "curation_summary.csv");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            EnrichmentConfig::from_toml("sheets = 3"),
            Err(EnrichmentError::Config(_))
        ));
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert!(delimiter_byte('→').is_err());
    }
}
