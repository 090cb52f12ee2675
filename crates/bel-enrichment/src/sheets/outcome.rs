//! Classifying curated rows into outcome buckets.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EnrichmentError, Result};
use crate::relation::Relation;

use super::table::{SheetRow, SheetTable, REQUIRED_COLUMNS};

/// Column label of the running row count.
pub const TOTAL_LABEL: &str = "Total";

/// Where a curated row ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurationOutcome {
    NotCurated,
    Error,
    Correct,
    ModifiedByCurator,
    ErrorButOtherStatementIdentified,
}

impl CurationOutcome {
    /// Outcomes in report column order.
    pub const ALL: [CurationOutcome; 5] = [
        CurationOutcome::Correct,
        CurationOutcome::Error,
        CurationOutcome::ErrorButOtherStatementIdentified,
        CurationOutcome::ModifiedByCurator,
        CurationOutcome::NotCurated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CurationOutcome::NotCurated => "Not curated",
            CurationOutcome::Error => "Error",
            CurationOutcome::Correct => "Correct",
            CurationOutcome::ModifiedByCurator => "Modified by curator",
            CurationOutcome::ErrorButOtherStatementIdentified => {
                "Error but other statement was identified"
            }
        }
    }
}

impl fmt::Display for CurationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handling of rows marked both correct and changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Log and count only in the total.
    #[default]
    Exclude,
    /// Log and count as an error where another statement was identified.
    ErrorButOtherStatement,
}

/// Result of reading a row's three flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Outcome(CurationOutcome),
    /// Correct and Changed were both marked.
    Conflict,
}

/// Map the checked/correct/changed flags onto an outcome.
pub fn classify(checked: bool, correct: bool, changed: bool) -> Classification {
    use CurationOutcome::*;

    if correct && changed {
        return Classification::Conflict;
    }
    Classification::Outcome(match (checked, correct, changed) {
        (false, false, false) => NotCurated,
        (true, false, false) => Error,
        (_, true, false) => Correct,
        (true, _, true) => ModifiedByCurator,
        (false, _, true) => ErrorButOtherStatementIdentified,
    })
}

/// Outcome tallies for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub not_curated: usize,
    pub error: usize,
    pub correct: usize,
    pub modified_by_curator: usize,
    pub error_but_other_statement: usize,
    /// Rows that hit a correct/changed conflict.
    pub conflicts: usize,
    /// Every classified row.
    pub total: usize,
}

impl OutcomeCounts {
    pub fn get(&self, outcome: CurationOutcome) -> usize {
        match outcome {
            CurationOutcome::NotCurated => self.not_curated,
            CurationOutcome::Error => self.error,
            CurationOutcome::Correct => self.correct,
            CurationOutcome::ModifiedByCurator => self.modified_by_curator,
            CurationOutcome::ErrorButOtherStatementIdentified => self.error_but_other_statement,
        }
    }

    fn bump(&mut self, outcome: CurationOutcome) {
        match outcome {
            CurationOutcome::NotCurated => self.not_curated += 1,
            CurationOutcome::Error => self.error += 1,
            CurationOutcome::Correct => self.correct += 1,
            CurationOutcome::ModifiedByCurator => self.modified_by_curator += 1,
            CurationOutcome::ErrorButOtherStatementIdentified => {
                self.error_but_other_statement += 1
            }
        }
    }

    /// Add another sheet's tallies.
    pub fn merge(&mut self, other: &OutcomeCounts) {
        self.not_curated += other.not_curated;
        self.error += other.error;
        self.correct += other.correct;
        self.modified_by_curator += other.modified_by_curator;
        self.error_but_other_statement += other.error_but_other_statement;
        self.conflicts += other.conflicts;
        self.total += other.total;
    }

    /// Label to count, in report column order, ending with the total.
    pub fn to_columns(&self) -> IndexMap<&'static str, usize> {
        let mut columns: IndexMap<&'static str, usize> = CurationOutcome::ALL
            .iter()
            .map(|o| (o.label(), self.get(*o)))
            .collect();
        columns.insert(TOTAL_LABEL, self.total);
        columns
    }
}

/// Restricts classification to one direction of causal edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTypeFilter {
    ActivationEdges,
    InhibitionEdges,
}

impl EdgeTypeFilter {
    pub fn accepts(&self, relation: Relation) -> bool {
        match self {
            EdgeTypeFilter::ActivationEdges => relation.is_causal_increase(),
            EdgeTypeFilter::InhibitionEdges => relation.is_causal_decrease(),
        }
    }
}

impl FromStr for EdgeTypeFilter {
    type Err = EnrichmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "activation_edges" => Ok(EdgeTypeFilter::ActivationEdges),
            "inhibition_edges" => Ok(EdgeTypeFilter::InhibitionEdges),
            other => Err(EnrichmentError::InvalidEdgeTypeFilter(other.to_string())),
        }
    }
}

/// Classifies every row of a curated sheet.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    placeholder_evidence: String,
    conflict_policy: ConflictPolicy,
    edge_type_filter: Option<EdgeTypeFilter>,
}

impl OutcomeClassifier {
    pub fn new(placeholder_evidence: impl Into<String>) -> Self {
        Self {
            placeholder_evidence: placeholder_evidence.into(),
            conflict_policy: ConflictPolicy::default(),
            edge_type_filter: None,
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_edge_type_filter(mut self, filter: Option<EdgeTypeFilter>) -> Self {
        self.edge_type_filter = filter;
        self
    }

    pub fn placeholder_evidence(&self) -> &str {
        &self.placeholder_evidence
    }

    /// Whether a row takes part in the report at all.
    pub fn counts_row(&self, row: &SheetRow<'_>) -> bool {
        if row.get("Evidence").is_some_and(|e| e == self.placeholder_evidence) {
            return false;
        }
        match self.edge_type_filter {
            Some(filter) => row
                .get("Predicate")
                .and_then(|p| p.trim().parse::<Relation>().ok())
                .is_some_and(|r| filter.accepts(r)),
            None => true,
        }
    }

    /// Classify a single row, or None if it is excluded from the report.
    pub fn classify_row(&self, row: &SheetRow<'_>) -> Option<Classification> {
        if !self.counts_row(row) {
            return None;
        }
        Some(classify(
            row.is_marked("Checked"),
            row.is_marked("Correct"),
            row.is_marked("Changed"),
        ))
    }

    /// Tally a whole sheet. A sheet without the template columns is an error.
    pub fn classify_sheet(&self, table: &SheetTable, path: &Path) -> Result<OutcomeCounts> {
        table.require_columns(path, &REQUIRED_COLUMNS)?;

        let mut counts = OutcomeCounts::default();
        for (line, row) in table.iter_rows() {
            let Some(classification) = self.classify_row(&row) else {
                continue;
            };
            counts.total += 1;
            match classification {
                Classification::Outcome(outcome) => counts.bump(outcome),
                Classification::Conflict => {
                    counts.conflicts += 1;
                    warn!(
                        path = %path.display(),
                        line,
                        "row is marked both correct and changed"
                    );
                    if self.conflict_policy == ConflictPolicy::ErrorButOtherStatement {
                        counts.bump(CurationOutcome::ErrorButOtherStatementIdentified);
                    }
                }
            }
        }
        Ok(counts)
    }
}
