//! Corpus-level processing from statements to sorted curation rows.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::FilterConfig;
use crate::render::EdgeRenderer;
use crate::statement::{filter_belief, filter_grounded_only, Preassembler, Statement};

use super::projector::StatementRowProjector;
use super::row::Row;

/// Options for turning a statement corpus into curation rows.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Drop statements below this belief (None = keep all).
    pub minimum_belief: Option<f64>,
    /// Keep statements with ungrounded agents.
    pub allow_ungrounded: bool,
    /// Keep every evidence of a statement instead of only the first.
    pub allow_duplicates: bool,
    /// Keep only evidence from these documents.
    pub keep_only_document_ids: Option<HashSet<String>>,
    /// Maximum rows to return after sorting (None = all).
    pub limit: Option<usize>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            minimum_belief: None,
            allow_ungrounded: true,
            allow_duplicates: false,
            keep_only_document_ids: None,
            limit: None,
        }
    }
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_belief(mut self, belief: f64) -> Self {
        self.minimum_belief = Some(belief);
        self
    }

    pub fn with_allow_ungrounded(mut self, allow: bool) -> Self {
        self.allow_ungrounded = allow;
        self
    }

    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn with_keep_only_document_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_only_document_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Runs preassembly, filtering, projection, sorting, and limiting.
pub struct StatementSetProcessor {
    preassembler: Arc<dyn Preassembler>,
    projector: StatementRowProjector,
}

impl StatementSetProcessor {
    /// Create a processor from its collaborators.
    pub fn new(
        config: &FilterConfig,
        preassembler: Arc<dyn Preassembler>,
        renderer: Arc<dyn EdgeRenderer>,
    ) -> Self {
        Self {
            preassembler,
            projector: StatementRowProjector::new(config, renderer),
        }
    }

    /// The row projector in use.
    pub fn projector(&self) -> &StatementRowProjector {
        &self.projector
    }

    /// Turn a statement corpus into sorted curation rows.
    ///
    /// Rows are ordered by document id then evidence text; rows with equal keys
    /// keep their projection order. The input statements are not modified.
    pub fn process(&self, statements: &[Statement], options: &ProcessOptions) -> Vec<Row> {
        let mut statements = self.preassembler.run_preassembly(statements);

        if !options.allow_ungrounded {
            statements = filter_grounded_only(statements);
        }

        if let Some(minimum_belief) = options.minimum_belief {
            statements = filter_belief(statements, minimum_belief);
        }

        debug!(statements = statements.len(), "projecting statements to rows");

        let mut rows: Vec<Row> = statements
            .iter()
            .flat_map(|statement| {
                self.projector.project(
                    statement,
                    options.allow_duplicates,
                    options.keep_only_document_ids.as_ref(),
                )
            })
            .collect();

        rows.sort_by(|a, b| (&a.pmid, &a.evidence).cmp(&(&b.pmid, &b.evidence)));

        if let Some(limit) = options.limit {
            rows.truncate(limit);
        }

        info!(rows = rows.len(), "built curation rows");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BelRenderer;
    use crate::statement::{Agent, Evidence, HashPreassembler};

    fn processor() -> StatementSetProcessor {
        StatementSetProcessor::new(
            &FilterConfig::default(),
            Arc::new(HashPreassembler),
            Arc::new(BelRenderer),
        )
    }

    fn statement(id: &str, belief: f64, pmid: &str, text: &str) -> Statement {
        Statement::new("Activation", id, belief)
            .with_agents(
                Agent::new(format!("S{}", id)).with_ref("HGNC", "1"),
                Agent::new("T").with_ref("HGNC", "2"),
            )
            .with_evidence(Evidence::new(pmid, text, "reach"))
    }

    #[test]
    fn test_sorted_by_document_then_text() {
        let statements = vec![
            statement("1", 0.9, "300", "b"),
            statement("2", 0.9, "100", "z"),
            statement("3", 0.9, "300", "a"),
        ];

        let rows = processor().process(&statements, &ProcessOptions::default());
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.pmid.as_str(), r.evidence.as_str()))
            .collect();
        assert_eq!(keys, vec![("100", "z"), ("300", "a"), ("300", "b")]);
    }

    #[test]
    fn test_belief_boundary() {
        let statements = vec![
            statement("1", 0.5, "1", "at threshold"),
            statement("2", 0.5 - f64::EPSILON, "2", "below threshold"),
        ];

        let rows = processor().process(&statements, &ProcessOptions::new().with_minimum_belief(0.5));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].uuid, "1");
    }

    #[test]
    fn test_limit_applies_after_sort() {
        let statements = vec![
            statement("1", 0.9, "3", "c"),
            statement("2", 0.9, "1", "a"),
            statement("3", 0.9, "2", "b"),
        ];

        let rows = processor().process(&statements, &ProcessOptions::new().with_limit(Some(2)));
        let pmids: Vec<_> = rows.iter().map(|r| r.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["1", "2"]);
    }

    #[test]
    fn test_ungrounded_filter() {
        let ungrounded = Statement::new("Activation", "u", 0.9)
            .with_agents(Agent::new("X"), Agent::new("Y"))
            .with_evidence(Evidence::new("1", "X activates Y.", "reach"));

        let options = ProcessOptions::new().with_allow_ungrounded(false);
        assert!(processor().process(&[ungrounded.clone()], &options).is_empty());
        assert_eq!(processor().process(&[ungrounded], &ProcessOptions::default()).len(), 1);
    }

    #[test]
    fn test_nothing_survives() {
        let statements = vec![statement("1", 0.1, "1", "weak")];
        let rows = processor().process(&statements, &ProcessOptions::new().with_minimum_belief(0.9));
        assert!(rows.is_empty());
    }
}
