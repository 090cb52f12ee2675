//! Machine-read statements: data model, retrieval, and preassembly.

mod model;
mod preassembly;
mod source;

pub use model::{Agent, Evidence, Statement, TEXT_NAMESPACE};
pub use preassembly::{filter_belief, filter_grounded_only, HashPreassembler, Preassembler};
pub use source::{IndraDbClient, StatementSource, API_KEY_ENV};
