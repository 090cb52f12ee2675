//! Candidate edges rendered from a statement.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::relation::{Citation, Relation};

/// Annotation key for the statement UUID.
pub const ANNOTATION_UUID: &str = "uuid";
/// Annotation key for the statement hash.
pub const ANNOTATION_STATEMENT_HASH: &str = "stmt_hash";
/// Annotation key for the evidence hash.
pub const ANNOTATION_EVIDENCE_HASH: &str = "source_hash";
/// Annotation key for the reader that produced the evidence.
pub const ANNOTATION_SOURCE_API: &str = "source_api";

/// One candidate BEL edge with its textual form and qualifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEdge {
    /// Subject term in BEL.
    pub subject: String,
    /// Relation between the terms.
    pub relation: Relation,
    /// Object term in BEL.
    pub object: String,
    /// Citation, absent for structural edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<Citation>,
    /// Evidence sentence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Provenance annotations.
    #[serde(default)]
    pub annotations: IndexMap<String, String>,
}

impl RenderedEdge {
    /// Create a structural edge with no qualifiers.
    pub fn unqualified(
        subject: impl Into<String>,
        relation: Relation,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation,
            object: object.into(),
            citation: None,
            evidence: None,
            annotations: IndexMap::new(),
        }
    }

    /// Create an edge backed by a citation and an evidence sentence.
    pub fn qualified(
        subject: impl Into<String>,
        relation: Relation,
        object: impl Into<String>,
        citation: Citation,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            citation: Some(citation),
            evidence: Some(evidence.into()),
            ..Self::unqualified(subject, relation, object)
        }
    }

    /// Add an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Get an annotation value.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(|s| s.as_str())
    }

    /// Subject, relation keyword, and object as text.
    pub fn parts(&self) -> [&str; 3] {
        [&self.subject, self.relation.as_str(), &self.object]
    }
}
