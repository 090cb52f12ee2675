//! Property-based tests for the evidence filter and the outcome classifier.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p bel-enrichment --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p bel-enrichment --test property_tests
//! ```

use std::path::Path;

use proptest::prelude::*;

use bel_enrichment::config::{FilterConfig, MODIFIED_ASSERTION, NO_EVIDENCE_TEXT};
use bel_enrichment::curation::EvidenceFilter;
use bel_enrichment::sheets::{
    classify, Classification, ConflictPolicy, CurationOutcome, OutcomeClassifier, SheetTable,
};
use bel_enrichment::statement::Evidence;

// =============================================================================
// Test Strategies
// =============================================================================

/// Document ids, sometimes empty.
fn document_id() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[0-9]{1,8}".prop_map(Some),
    ]
}

/// Evidence texts, including the placeholders.
fn evidence_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some(NO_EVIDENCE_TEXT.to_string())),
        Just(Some(MODIFIED_ASSERTION.to_string())),
        "[A-Za-z ,.]{1,60}".prop_map(Some),
    ]
}

/// Source APIs, including the blacklisted ones.
fn source_api() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("bel".to_string()),
        Just("signor".to_string()),
        Just("reach".to_string()),
        "[a-z]{3,10}",
    ]
}

fn evidence() -> impl Strategy<Value = Evidence> {
    (document_id(), evidence_text(), source_api()).prop_map(|(pmid, text, source_api)| Evidence {
        source_api,
        pmid,
        text,
        source_hash: None,
    })
}

/// A cell that is either blank or marked.
fn cell() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("x"), Just("X"), Just("1"), Just("NaN")]
}

// =============================================================================
// EvidenceFilter
// =============================================================================

proptest! {
    #[test]
    fn evidence_filter_matches_its_conditions(evidence in evidence()) {
        let filter = EvidenceFilter::new(&FilterConfig::default());

        let text = evidence.text.clone().unwrap_or_default();
        let pmid = evidence.pmid.clone().unwrap_or_default();
        let rejected = pmid.is_empty()
            || text.is_empty()
            || text == NO_EVIDENCE_TEXT
            || text == MODIFIED_ASSERTION
            || evidence.source_api.is_empty()
            || evidence.source_api == "bel"
            || evidence.source_api == "signor";

        prop_assert_eq!(filter.keep(&evidence), !rejected);
    }

    #[test]
    fn evidence_filter_preserves_order(items in prop::collection::vec(evidence(), 0..20)) {
        let filter = EvidenceFilter::default();
        let kept = filter.filter(&items);

        let expected: Vec<Evidence> = items.iter().filter(|e| filter.keep(e)).cloned().collect();
        prop_assert_eq!(kept, expected);
    }
}

// =============================================================================
// Outcome classifier
// =============================================================================

proptest! {
    #[test]
    fn classification_is_total_and_exclusive(checked: bool, correct: bool, changed: bool) {
        let classification = classify(checked, correct, changed);

        if correct && changed {
            prop_assert_eq!(classification, Classification::Conflict);
        } else if correct {
            prop_assert_eq!(classification, Classification::Outcome(CurationOutcome::Correct));
        } else {
            prop_assert!(matches!(classification, Classification::Outcome(_)));
        }
    }

    #[test]
    fn total_counts_every_classified_row(
        rows in prop::collection::vec((cell(), cell(), cell()), 0..40),
        exclude in any::<bool>(),
    ) {
        let headers: Vec<String> = ["Evidence", "Curator", "Checked", "Correct", "Changed"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = SheetTable::new(
            headers,
            rows.iter()
                .map(|(a, b, c)| {
                    vec!["text".to_string(), "cth".to_string(), a.to_string(), b.to_string(), c.to_string()]
                })
                .collect(),
        );
        let policy = if exclude {
            ConflictPolicy::Exclude
        } else {
            ConflictPolicy::ErrorButOtherStatement
        };

        let counts = OutcomeClassifier::new(NO_EVIDENCE_TEXT)
            .with_conflict_policy(policy)
            .classify_sheet(&table, Path::new("sheet.tsv"))
            .unwrap();

        let bucketed: usize = CurationOutcome::ALL.iter().map(|o| counts.get(*o)).sum();
        prop_assert_eq!(counts.total, rows.len());
        if exclude {
            prop_assert_eq!(bucketed + counts.conflicts, counts.total);
        } else {
            prop_assert_eq!(bucketed, counts.total);
        }
    }
}
