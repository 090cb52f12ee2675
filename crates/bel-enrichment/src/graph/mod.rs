//! The curated graph, the statement parser seam, and graph persistence.

mod graph;
mod parser;
mod persistence;

pub use graph::{count_apis, CurationGraph, GraphEdge, GraphSource, GraphWarning, ANNOTATION_API};
pub use parser::{ParseContext, ParseWarning, RelationParser, StatementParser};
