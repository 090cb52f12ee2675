//! The graph assembled from curated sheets.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::relation::{Citation, Relation};

use super::parser::ParseWarning;

/// Annotation key carrying the reader recorded on a curated row.
pub const ANNOTATION_API: &str = "INDRA_API";

/// A curated edge with its qualifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub subject: String,
    pub relation: Relation,
    pub object: String,
    pub citation: Option<Citation>,
    pub evidence: Option<String>,
    pub annotations: IndexMap<String, String>,
    /// Line of the sheet the edge came from.
    pub line: Option<usize>,
}

impl GraphEdge {
    /// Create an edge with no qualifiers.
    pub fn new(subject: impl Into<String>, relation: Relation, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            relation,
            object: object.into(),
            citation: None,
            evidence: None,
            annotations: IndexMap::new(),
            line: None,
        }
    }
}

/// A recoverable problem found while ingesting one sheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphWarning {
    /// Sheet the row came from, if known.
    pub path: Option<PathBuf>,
    /// Line within the sheet.
    pub line: usize,
    /// The parser's report.
    pub warning: ParseWarning,
}

impl fmt::Display for GraphWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}: {}", path.display(), self.line, self.warning),
            None => write!(f, "line {}: {}", self.line, self.warning),
        }
    }
}

/// A sheet that contributed to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSource {
    pub path: PathBuf,
    /// SHA-256 of the sheet contents.
    pub hash: String,
}

/// Edges, warnings, and provenance of a curated graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationGraph {
    /// When the graph was assembled.
    pub built_at: DateTime<Utc>,
    /// Sheets ingested, in order.
    pub sources: Vec<GraphSource>,
    /// Edges in insertion order.
    pub edges: Vec<GraphEdge>,
    /// Per-row warnings.
    pub warnings: Vec<GraphWarning>,
}

impl Default for CurationGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CurationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            built_at: Utc::now(),
            sources: Vec::new(),
            edges: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    /// Record a parser warning for a row.
    pub fn add_warning(&mut self, path: Option<&Path>, warning: ParseWarning) {
        self.warnings.push(GraphWarning {
            path: path.map(Path::to_path_buf),
            line: warning.line(),
            warning,
        });
    }

    pub fn add_source(&mut self, path: impl Into<PathBuf>, hash: impl Into<String>) {
        self.sources.push(GraphSource {
            path: path.into(),
            hash: hash.into(),
        });
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct terms in first-seen order.
    pub fn nodes(&self) -> IndexSet<&str> {
        self.edges
            .iter()
            .flat_map(|e| [e.subject.as_str(), e.object.as_str()])
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// In-degree plus out-degree of every node.
    pub fn degrees(&self) -> IndexMap<&str, usize> {
        let mut degrees: IndexMap<&str, usize> = IndexMap::new();
        for edge in &self.edges {
            *degrees.entry(edge.subject.as_str()).or_insert(0) += 1;
            *degrees.entry(edge.object.as_str()).or_insert(0) += 1;
        }
        degrees
    }

    /// Remove every edge touching a node matching the predicate.
    pub fn remove_nodes(&mut self, predicate: impl Fn(&str) -> bool) {
        self.edges
            .retain(|e| !predicate(&e.subject) && !predicate(&e.object));
    }
}

/// Count the readers recorded on curated edges.
pub fn count_apis(graph: &CurationGraph) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for edge in &graph.edges {
        let Some(api) = edge.annotations.get(ANNOTATION_API) else {
            continue;
        };
        let api = api.trim();
        if api.is_empty() || api == "nan" {
            continue;
        }
        *counts.entry(api.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(s: &str, o: &str) -> GraphEdge {
        GraphEdge::new(s, Relation::Increases, o)
    }

    #[test]
    fn test_degrees() {
        let mut graph = CurationGraph::new();
        graph.add_edge(edge("a", "b"));
        graph.add_edge(edge("a", "c"));

        let degrees = graph.degrees();
        assert_eq!(degrees["a"], 2);
        assert_eq!(degrees["b"], 1);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_remove_nodes() {
        let mut graph = CurationGraph::new();
        graph.add_edge(edge("a", "bp(GO:x)"));
        graph.add_edge(edge("a", "b"));
        graph.remove_nodes(|n| n.starts_with("bp("));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_count_apis() {
        let mut graph = CurationGraph::new();
        for api in ["reach", "reach", "sparser", "nan", ""] {
            let mut e = edge("a", "b");
            e.annotations.insert(ANNOTATION_API.to_string(), api.to_string());
            graph.add_edge(e);
        }
        graph.add_edge(edge("c", "d"));

        let counts = count_apis(&graph);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["reach"], 2);
        assert_eq!(counts["sparser"], 1);
    }

    #[test]
    fn test_warning_display() {
        let mut graph = CurationGraph::new();
        graph.add_warning(
            Some(Path::new("AKT1/AKT1.bel.tsv")),
            ParseWarning::Syntax {
                line: 4,
                text: "p(A".to_string(),
                position: 3,
            },
        );
        let rendered = graph.warnings[0].to_string();
        assert!(rendered.starts_with("AKT1/AKT1.bel.tsv:4:"));
    }
}
