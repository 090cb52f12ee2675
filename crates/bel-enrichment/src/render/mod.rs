//! Rendering statements into candidate BEL edges.

mod edge;
mod renderer;

pub use edge::{
    RenderedEdge, ANNOTATION_EVIDENCE_HASH, ANNOTATION_SOURCE_API, ANNOTATION_STATEMENT_HASH,
    ANNOTATION_UUID,
};
pub use renderer::{BelRenderer, EdgeRenderer};
