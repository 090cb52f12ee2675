//! Projecting one statement into curation rows.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::config::FilterConfig;
use crate::render::{
    EdgeRenderer, RenderedEdge, ANNOTATION_EVIDENCE_HASH, ANNOTATION_SOURCE_API,
    ANNOTATION_STATEMENT_HASH, ANNOTATION_UUID,
};
use crate::statement::Statement;

use super::filter::EvidenceFilter;
use super::row::{round_belief, Row};

/// Converts a statement and its usable evidence into curation rows.
pub struct StatementRowProjector {
    filter: EvidenceFilter,
    substring_blacklist: Vec<String>,
    renderer: Arc<dyn EdgeRenderer>,
}

impl StatementRowProjector {
    /// Create a projector with the configured blacklists.
    pub fn new(config: &FilterConfig, renderer: Arc<dyn EdgeRenderer>) -> Self {
        Self {
            filter: EvidenceFilter::new(config),
            substring_blacklist: config.substring_blacklist.clone(),
            renderer,
        }
    }

    /// The evidence filter in use.
    pub fn evidence_filter(&self) -> &EvidenceFilter {
        &self.filter
    }

    /// Project a statement into rows.
    ///
    /// The statement itself is not modified; a pruned copy is rendered. When
    /// `allow_duplicates` is false only the first surviving evidence is kept, so
    /// a statement yields rows from a single evidence at most.
    pub fn project(
        &self,
        statement: &Statement,
        allow_duplicates: bool,
        keep_only_document_ids: Option<&HashSet<String>>,
    ) -> Vec<Row> {
        let mut evidence = self.filter.filter(&statement.evidence);
        if evidence.is_empty() {
            return Vec::new();
        }

        if let Some(document_ids) = keep_only_document_ids {
            evidence.retain(|e| document_ids.contains(e.document_id()));
        }

        if !allow_duplicates {
            evidence.truncate(1);
        }

        let pruned = Statement {
            evidence,
            ..statement.clone()
        };

        self.renderer
            .render(&pruned)
            .into_iter()
            .filter_map(|edge| self.edge_to_row(&pruned, edge))
            .collect()
    }

    fn edge_to_row(&self, statement: &Statement, edge: RenderedEdge) -> Option<Row> {
        if edge.relation.is_unqualified() {
            return None;
        }

        if edge.parts().iter().any(|part| {
            self.substring_blacklist
                .iter()
                .any(|substring| part.contains(substring.as_str()))
        }) {
            return None;
        }

        let Some(citation) = &edge.citation else {
            debug!(uuid = %statement.id, "no citation information");
            return None;
        };

        let annotation = |key: &str| edge.annotation(key).map(str::to_string);

        Some(Row {
            uuid: annotation(ANNOTATION_UUID).unwrap_or_else(|| statement.id.clone()),
            statement_hash: annotation(ANNOTATION_STATEMENT_HASH)
                .unwrap_or_else(|| statement.hash().to_string()),
            evidence_hash: annotation(ANNOTATION_EVIDENCE_HASH).unwrap_or_default(),
            api: annotation(ANNOTATION_SOURCE_API).unwrap_or_default(),
            belief: round_belief(statement.belief),
            pmid: citation.reference.clone(),
            evidence: edge.evidence.clone().unwrap_or_default(),
            bel_subject: edge.subject.clone(),
            bel_relation: edge.relation.as_str().to_string(),
            bel_object: edge.object.clone(),
        })
    }
}
