//! Integration tests for the statement-to-sheet direction.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use bel_enrichment::config::FilterConfig;
use bel_enrichment::curation::{CurationSheetWriter, ProcessOptions, StatementSetProcessor};
use bel_enrichment::render::{BelRenderer, EdgeRenderer, RenderedEdge};
use bel_enrichment::statement::{Agent, Evidence, HashPreassembler, Statement};

/// Build an activation between two grounded genes.
fn activation(subject: &str, object: &str, belief: f64) -> Statement {
    Statement::new("Activation", format!("{}-{}", subject, object), belief).with_agents(
        Agent::new(subject).with_ref("HGNC", "1"),
        Agent::new(object).with_ref("HGNC", "2"),
    )
}

fn processor() -> StatementSetProcessor {
    StatementSetProcessor::new(
        &FilterConfig::default(),
        Arc::new(HashPreassembler),
        Arc::new(BelRenderer),
    )
}

/// Renders every evidence twice, as two distinct qualified edges.
struct DoubleRenderer;

impl EdgeRenderer for DoubleRenderer {
    fn render(&self, statement: &Statement) -> Vec<RenderedEdge> {
        BelRenderer
            .render(statement)
            .into_iter()
            .flat_map(|edge| {
                let mut twin = edge.clone();
                twin.object = format!("{}x", twin.object.trim_end_matches(')'));
                twin.object.push(')');
                [edge, twin]
            })
            .collect()
    }
}

// =============================================================================
// StatementSetProcessor
// =============================================================================

#[test]
fn test_belief_cutoff_is_inclusive() {
    let statements = vec![
        activation("A", "B", 0.3).with_evidence(Evidence::new("1", "A activates B.", "reach")),
        activation("C", "D", 0.3 - 1e-9).with_evidence(Evidence::new("2", "C activates D.", "reach")),
    ];

    let rows = processor().process(&statements, &ProcessOptions::new().with_minimum_belief(0.3));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pmid, "1");
}

#[test]
fn test_one_row_per_statement_without_duplicates() {
    let statement = activation("A", "B", 0.9)
        .with_evidence(Evidence::new("1", "First.", "reach"))
        .with_evidence(Evidence::new("2", "Second.", "sparser"))
        .with_evidence(Evidence::new("3", "Third.", "medscan"));

    let processor = StatementSetProcessor::new(
        &FilterConfig::default(),
        Arc::new(HashPreassembler),
        Arc::new(DoubleRenderer),
    );

    let rows = processor.process(std::slice::from_ref(&statement), &ProcessOptions::new());
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.pmid == "1"));

    let rows = processor.process(
        std::slice::from_ref(&statement),
        &ProcessOptions::new().with_allow_duplicates(true),
    );
    assert_eq!(rows.len(), 6);

    // the caller's statement keeps all of its evidence
    assert_eq!(statement.evidence.len(), 3);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let first = activation("A", "B", 0.9).with_evidence(Evidence::new("7", "Same text.", "reach"));
    let second = activation("C", "D", 0.4).with_evidence(Evidence::new("7", "Same text.", "reach"));
    let earlier = activation("E", "F", 0.5).with_evidence(Evidence::new("1", "Earlier.", "reach"));

    let rows = processor().process(
        &[first.clone(), second.clone(), earlier.clone()],
        &ProcessOptions::new(),
    );
    let ids: Vec<&str> = rows.iter().map(|r| r.uuid.as_str()).collect();
    assert_eq!(ids, vec!["E-F", "A-B", "C-D"]);

    let rows = processor().process(&[second, first, earlier], &ProcessOptions::new());
    let ids: Vec<&str> = rows.iter().map(|r| r.uuid.as_str()).collect();
    assert_eq!(ids, vec!["E-F", "C-D", "A-B"]);
}

#[test]
fn test_processing_is_repeatable() {
    let statements: Vec<Statement> = (0..5)
        .map(|i| {
            activation(&format!("G{}", i), "T", 0.5 + i as f64 / 10.0).with_evidence(
                Evidence::new(format!("{}", 10 - i), format!("Sentence {}.", i), "reach"),
            )
        })
        .collect();
    let options = ProcessOptions::new().with_minimum_belief(0.6).with_limit(Some(3));

    let once = processor().process(&statements, &options);
    let twice = processor().process(&statements, &options);

    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn test_keep_only_document_ids() {
    let statement = activation("A", "B", 0.9)
        .with_evidence(Evidence::new("1", "First.", "reach"))
        .with_evidence(Evidence::new("2", "Second.", "reach"));

    let keep: HashSet<String> = ["2".to_string()].into_iter().collect();
    let rows = processor().process(
        &[statement],
        &ProcessOptions::new().with_keep_only_document_ids(keep),
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pmid, "2");
}

#[test]
fn test_ungrounded_statements_can_be_dropped() {
    let grounded = activation("A", "B", 0.9).with_evidence(Evidence::new("1", "A.", "reach"));
    let ungrounded = Statement::new("Activation", "u", 0.9)
        .with_agents(Agent::new("x").with_ref("TEXT", "x"), Agent::new("B").with_ref("HGNC", "2"))
        .with_evidence(Evidence::new("2", "x.", "reach"));

    let all = processor().process(&[grounded.clone(), ungrounded.clone()], &ProcessOptions::new());
    assert_eq!(all.len(), 2);

    let only = processor().process(
        &[grounded, ungrounded],
        &ProcessOptions::new().with_allow_ungrounded(false),
    );
    assert_eq!(only.len(), 1);
}

// =============================================================================
// CurationSheetWriter
// =============================================================================

#[test]
fn test_sheet_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AKT1.bel.tsv");

    let statements = vec![
        activation("AKT1", "GSK3B", 0.876)
            .with_evidence(Evidence::new("20", "AKT1 activates GSK3B.", "reach").with_source_hash("99")),
        activation("AKT1", "MTOR", 0.5)
            .with_evidence(Evidence::new("10", "AKT1 activates MTOR.", "sparser")),
    ];
    let rows = processor().process(&statements, &ProcessOptions::new());

    let written = CurationSheetWriter::new()
        .with_extra_columns(vec!["Curator".to_string(), "Checked".to_string()])
        .write_path(&rows, &path)
        .unwrap();
    assert_eq!(written, 2);

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "PMID\tEvidence\tSubject\tPredicate\tObject\tCurator\tChecked\tUUID\tStatement Hash\tEvidence Hash\tAPI\tBelief"
    );
    assert!(lines[1].starts_with("10\tAKT1 activates MTOR.\tp(HGNC:AKT1)\tincreases\tact(p(HGNC:MTOR))\t\t\t"));
    assert!(lines[2].ends_with("\t99\treach\t0.88"));
}

#[test]
fn test_empty_result_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bel.tsv");

    let statement = activation("A", "B", 0.9)
        .with_evidence(Evidence::new("1", "No evidence text.", "reach"))
        .with_evidence(Evidence::new("2", "Fine.", "signor"));
    let rows = processor().process(&[statement], &ProcessOptions::new());
    assert!(rows.is_empty());

    assert_eq!(CurationSheetWriter::new().write_path(&rows, &path).unwrap(), 0);
    assert!(!path.exists());
}
