//! Curated sheets: reading, discovery, ingestion, and outcome reporting.

mod ingest;
mod listing;
mod outcome;
mod summary;
mod table;

pub use ingest::{
    IngestReport, RowStatus, SheetRowIngester, ANNOTATION_CONFIDENCE, ANNOTATION_CURATOR,
    ANNOTATION_INDRA_BELIEF, ANNOTATION_INDRA_UUID, CURATED_CONFIDENCE,
};
pub use listing::{DirectoryListing, SheetListing};
pub use outcome::{
    classify, Classification, ConflictPolicy, CurationOutcome, EdgeTypeFilter, OutcomeClassifier,
    OutcomeCounts, TOTAL_LABEL,
};
pub use summary::{count_error_types, CurationSummary, CurationSummaryAggregator, ERROR_TYPE_COLUMN};
pub use table::{
    is_null_value, SheetReader, SheetReaderConfig, SheetRow, SheetSource, SheetTable,
    REQUIRED_COLUMNS,
};
