//! Evidence quality filter.

use std::collections::BTreeSet;

use crate::config::FilterConfig;
use crate::statement::Evidence;

/// Why an evidence record was not usable for curation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceRejection {
    MissingDocument,
    MissingText,
    BlacklistedText,
    MissingSource,
    BlacklistedSource,
}

/// Decides whether a single evidence record is worth showing to a curator.
#[derive(Debug, Clone)]
pub struct EvidenceFilter {
    text_blacklist: BTreeSet<String>,
    source_blacklist: BTreeSet<String>,
}

impl EvidenceFilter {
    /// Create a filter from the configured blacklists.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            text_blacklist: config.text_blacklist.clone(),
            source_blacklist: config.source_blacklist.clone(),
        }
    }

    /// The first reason the evidence is unusable, if any.
    pub fn check(&self, evidence: &Evidence) -> Option<EvidenceRejection> {
        let text = evidence.text();

        if evidence.document_id().is_empty() {
            Some(EvidenceRejection::MissingDocument)
        } else if text.is_empty() {
            Some(EvidenceRejection::MissingText)
        } else if self.text_blacklist.contains(text) {
            Some(EvidenceRejection::BlacklistedText)
        } else if evidence.source_api.is_empty() {
            Some(EvidenceRejection::MissingSource)
        } else if self.source_blacklist.contains(&evidence.source_api) {
            Some(EvidenceRejection::BlacklistedSource)
        } else {
            None
        }
    }

    /// Whether the evidence is usable.
    pub fn keep(&self, evidence: &Evidence) -> bool {
        self.check(evidence).is_none()
    }

    /// Copy the usable evidence, preserving order.
    pub fn filter(&self, evidence: &[Evidence]) -> Vec<Evidence> {
        evidence.iter().filter(|e| self.keep(e)).cloned().collect()
    }
}

impl Default for EvidenceFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
