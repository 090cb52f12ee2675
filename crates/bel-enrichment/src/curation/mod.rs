//! Forward direction: from machine-read statements to curation sheets.
//!
//! ```text
//! statements ──► preassembly ──► grounding/belief filters
//!            ──► evidence filter + row projection (per statement)
//!            ──► sort by (PMID, evidence) ──► limit ──► sheet
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use bel_enrichment::config::FilterConfig;
//! use bel_enrichment::curation::{CurationSheetWriter, ProcessOptions, StatementSetProcessor};
//! use bel_enrichment::render::BelRenderer;
//! use bel_enrichment::statement::HashPreassembler;
//!
//! # fn example(statements: Vec<bel_enrichment::statement::Statement>) -> bel_enrichment::Result<()> {
//! let processor = StatementSetProcessor::new(
//!     &FilterConfig::default(),
//!     Arc::new(HashPreassembler),
//!     Arc::new(BelRenderer),
//! );
//! let rows = processor.process(&statements, &ProcessOptions::new().with_minimum_belief(0.3));
//! CurationSheetWriter::new().write_path(&rows, "AKT1.bel.tsv")?;
//! # Ok(())
//! # }
//! ```

mod filter;
mod processor;
mod projector;
mod row;
mod writer;

pub use filter::{EvidenceFilter, EvidenceRejection};
pub use processor::{ProcessOptions, StatementSetProcessor};
pub use projector::StatementRowProjector;
pub use row::{format_belief, round_belief, Row, END_HEADER, START_HEADER};
pub use writer::CurationSheetWriter;
