//! Curation sheet rows.

use serde::{Deserialize, Serialize};

/// Leading columns of a curation sheet.
pub const START_HEADER: [&str; 5] = ["PMID", "Evidence", "Subject", "Predicate", "Object"];

/// Trailing provenance columns of a curation sheet.
pub const END_HEADER: [&str; 5] = ["UUID", "Statement Hash", "Evidence Hash", "API", "Belief"];

/// One line of a curation sheet: a single (statement, evidence, edge) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub uuid: String,
    pub statement_hash: String,
    pub evidence_hash: String,
    pub api: String,
    /// Statement belief rounded to two decimals.
    pub belief: f64,
    pub pmid: String,
    pub evidence: String,
    pub bel_subject: String,
    pub bel_relation: String,
    pub bel_object: String,
}

impl Row {
    /// Values for the leading columns.
    pub fn start_fields(&self) -> [&str; 5] {
        [
            &self.pmid,
            &self.evidence,
            &self.bel_subject,
            &self.bel_relation,
            &self.bel_object,
        ]
    }

    /// Values for the trailing columns.
    pub fn end_fields(&self) -> [String; 5] {
        [
            self.uuid.clone(),
            self.statement_hash.clone(),
            self.evidence_hash.clone(),
            self.api.clone(),
            format_belief(self.belief),
        ]
    }
}

/// Round a belief score to two decimals, ties to even on the exact binary value.
pub fn round_belief(belief: f64) -> f64 {
    format!("{:.2}", belief).parse().unwrap_or(belief)
}

/// Belief as written to a sheet; whole numbers keep one decimal (`1.0`).
pub fn format_belief(belief: f64) -> String {
    if belief.is_finite() && belief.fract() == 0.0 {
        format!("{:.1}", belief)
    } else {
        belief.to_string()
    }
}
