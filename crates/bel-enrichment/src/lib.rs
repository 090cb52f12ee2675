//! BEL enrichment: curation sheets from machine-read statements, and curated
//! knowledge back from those sheets.
//!
//! Literature-mining statements are filtered, projected into one row per
//! candidate edge, and written as a delimited sheet for human review. Curators
//! mark each row as checked, correct, or changed; the curated sheets are then
//! ingested into a graph and summarized by outcome.
//!
//! # Core Principles
//!
//! - **Non-destructive**: Statements are never mutated; filtering returns copies
//! - **Row-level resilience**: One bad curated row never aborts its sheet
//! - **Deterministic output**: Rows are stably sorted by document and evidence
//!
//! # Example
//!
//! ```no_run
//! use bel_enrichment::{EnrichmentConfig, SheetsRepository};
//!
//! let repository = SheetsRepository::new("curation", EnrichmentConfig::default());
//! let graph = repository.get_graph(true).unwrap();
//! let summary = repository.generate_curation_summary(None).unwrap();
//!
//! println!("Edges: {}", graph.edge_count());
//! println!("Curated genes: {}", summary.outcomes.len());
//! ```

pub mod config;
pub mod curation;
pub mod error;
pub mod graph;
pub mod ranking;
pub mod relation;
pub mod render;
pub mod sheets;
pub mod statement;
pub mod workflow;

mod repository;

pub use config::EnrichmentConfig;
pub use curation::{CurationSheetWriter, EvidenceFilter, ProcessOptions, Row, StatementSetProcessor};
pub use error::{EnrichmentError, Result};
pub use graph::{CurationGraph, ParseWarning};
pub use repository::SheetsRepository;
pub use sheets::{CurationOutcome, CurationSummary, CurationSummaryAggregator, OutcomeClassifier};
pub use statement::{Evidence, Statement};
pub use workflow::EnrichmentWorkflow;
