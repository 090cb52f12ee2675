//! Finding under-curated genes around which to expand curation.
//!
//! The graph is first reduced to gene-level causal knowledge by a
//! [`GraphPipeline`], then every gene is ranked by `1 / (1 + degree)`, so
//! genes with few curated edges rank highest.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::graph::CurationGraph;
use crate::relation::Relation;

/// Protein, RNA, or gene term, capturing namespace and name.
static CENTRAL_DOGMA_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:p|r|g|proteinAbundance|rnaAbundance|geneAbundance)\(([A-Za-z0-9_.]+):("(?:[^"\\]|\\.)*"|[^,()\s]+)"#,
    )
    .unwrap()
});

/// Gene term, capturing namespace and name.
static GENE_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:g|geneAbundance)\(([A-Za-z0-9_.]+):("(?:[^"\\]|\\.)*"|[^,()\s]+)\)$"#).unwrap()
});

const BIOLOGICAL_PROCESS_FUNCTIONS: &[&str] = &["bp", "biologicalProcess"];
const PATHOLOGY_FUNCTIONS: &[&str] = &["path", "pathology"];
const ABUNDANCE_FUNCTIONS: &[&str] = &["a", "abundance"];

/// An in-place transformation of a curated graph.
pub trait GraphTransform {
    fn name(&self) -> &'static str;
    fn apply(&self, graph: &mut CurationGraph);
}

/// Rewrites protein and RNA terms, with any variants, to their gene.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseToGenes;

impl CollapseToGenes {
    /// Gene term for a protein, RNA, or gene term; None for anything else.
    pub fn gene_of(term: &str) -> Option<String> {
        let caps = CENTRAL_DOGMA_TERM.captures(term)?;
        Some(format!("g({}:{})", &caps[1], &caps[2]))
    }
}

impl GraphTransform for CollapseToGenes {
    fn name(&self) -> &'static str {
        "collapse_to_genes"
    }

    fn apply(&self, graph: &mut CurationGraph) {
        for edge in &mut graph.edges {
            if let Some(gene) = Self::gene_of(&edge.subject) {
                edge.subject = gene;
            }
            if let Some(gene) = Self::gene_of(&edge.object) {
                edge.object = gene;
            }
        }
    }
}

/// Drops association edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveAssociations;

impl GraphTransform for RemoveAssociations {
    fn name(&self) -> &'static str {
        "remove_associations"
    }

    fn apply(&self, graph: &mut CurationGraph) {
        graph.edges.retain(|e| e.relation != Relation::Association);
    }
}

/// Drops every node whose term uses one of the given functions.
#[derive(Debug, Clone, Copy)]
pub struct RemoveFunctions {
    name: &'static str,
    functions: &'static [&'static str],
}

impl RemoveFunctions {
    pub fn biological_processes() -> Self {
        Self {
            name: "remove_biological_processes",
            functions: BIOLOGICAL_PROCESS_FUNCTIONS,
        }
    }

    pub fn pathologies() -> Self {
        Self {
            name: "remove_pathologies",
            functions: PATHOLOGY_FUNCTIONS,
        }
    }

    pub fn abundances() -> Self {
        Self {
            name: "remove_abundances",
            functions: ABUNDANCE_FUNCTIONS,
        }
    }

    fn matches(&self, term: &str) -> bool {
        term.split_once('(')
            .is_some_and(|(function, _)| self.functions.contains(&function))
    }
}

impl GraphTransform for RemoveFunctions {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, graph: &mut CurationGraph) {
        graph.remove_nodes(|term| self.matches(term));
    }
}

/// An ordered sequence of transformations.
pub struct GraphPipeline {
    steps: Vec<Box<dyn GraphTransform>>,
}

impl GraphPipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn then(mut self, step: impl GraphTransform + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Step names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run the steps on a copy of the graph.
    pub fn run(&self, graph: &CurationGraph) -> CurationGraph {
        let mut graph = graph.clone();
        for step in &self.steps {
            step.apply(&mut graph);
        }
        graph
    }
}

impl Default for GraphPipeline {
    /// Reduce a graph to gene-level causal knowledge.
    fn default() -> Self {
        Self::new()
            .then(CollapseToGenes)
            .then(RemoveAssociations)
            .then(RemoveFunctions::biological_processes())
            .then(RemoveFunctions::pathologies())
            .then(RemoveFunctions::abundances())
    }
}

/// A gene and its information-density rank.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRank {
    pub namespace: String,
    pub name: String,
    pub rank: f64,
}

impl GeneRank {
    pub fn is_hgnc(&self) -> bool {
        self.namespace.eq_ignore_ascii_case("hgnc")
    }
}

/// Rank the gene nodes of a graph, highest rank first.
pub fn rank_genes(graph: &CurationGraph) -> Vec<GeneRank> {
    let mut ranks: Vec<GeneRank> = graph
        .degrees()
        .into_iter()
        .filter_map(|(term, degree)| {
            let caps = GENE_TERM.captures(term)?;
            Some(GeneRank {
                namespace: caps[1].to_string(),
                name: caps[2].trim_matches('"').to_string(),
                rank: 1.0 / (1.0 + degree as f64),
            })
        })
        .collect();

    ranks.sort_by(|a, b| {
        b.rank
            .partial_cmp(&a.rank)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranks
}

/// Run the default pipeline, then rank the genes.
pub fn process_rank_genes(graph: &CurationGraph) -> Vec<GeneRank> {
    rank_genes(&GraphPipeline::default().run(graph))
}

/// Gene names worth exporting: every HGNC gene, plus others ranked above the cutoff.
pub fn gene_symbols(graph: &CurationGraph, cutoff: f64) -> Vec<String> {
    process_rank_genes(graph)
        .into_iter()
        .filter(|g| g.is_hgnc() || cutoff < g.rank)
        .map(|g| g.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphEdge;

    fn graph(edges: &[(&str, Relation, &str)]) -> CurationGraph {
        let mut graph = CurationGraph::new();
        for (s, r, o) in edges {
            graph.add_edge(GraphEdge::new(*s, *r, *o));
        }
        graph
    }

    #[test]
    fn test_gene_of() {
        assert_eq!(
            CollapseToGenes::gene_of("p(HGNC:AKT1, pmod(Ph, Ser, 473))").as_deref(),
            Some("g(HGNC:AKT1)")
        );
        assert_eq!(CollapseToGenes::gene_of("r(HGNC:MAPT)").as_deref(), Some("g(HGNC:MAPT)"));
        assert_eq!(
            CollapseToGenes::gene_of("p(FPLX:\"AKT family\")").as_deref(),
            Some("g(FPLX:\"AKT family\")")
        );
        assert_eq!(CollapseToGenes::gene_of("bp(GO:apoptosis)"), None);
        assert_eq!(CollapseToGenes::gene_of("complex(p(HGNC:A), p(HGNC:B))"), None);
    }

    #[test]
    fn test_default_pipeline() {
        let g = graph(&[
            ("p(HGNC:A)", Relation::Increases, "p(HGNC:B, pmod(Ph))"),
            ("p(HGNC:A)", Relation::Association, "p(HGNC:C)"),
            ("p(HGNC:A)", Relation::Increases, "bp(GO:apoptosis)"),
            ("a(CHEBI:x)", Relation::Decreases, "p(HGNC:D)"),
            ("p(HGNC:D)", Relation::Increases, "path(MESH:d)"),
        ]);

        let processed = GraphPipeline::default().run(&g);
        assert_eq!(processed.edge_count(), 1);
        assert_eq!(processed.edges[0].subject, "g(HGNC:A)");
        assert_eq!(processed.edges[0].object, "g(HGNC:B)");
        // the input is untouched
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_rank_genes() {
        let g = graph(&[
            ("p(HGNC:A)", Relation::Increases, "p(HGNC:B)"),
            ("p(HGNC:A)", Relation::Decreases, "r(HGNC:C)"),
        ]);

        let ranks = process_rank_genes(&g);
        let names: Vec<&str> = ranks.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert!((ranks[0].rank - 0.5).abs() < 1e-9);
        assert!((ranks[2].rank - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_gene_symbols_cutoff() {
        let g = graph(&[
            ("p(HGNC:A)", Relation::Increases, "p(FPLX:B)"),
            ("p(HGNC:A)", Relation::Increases, "p(FPLX:C)"),
            ("p(FPLX:C)", Relation::Increases, "p(HGNC:D)"),
        ]);

        // FPLX:B has rank 0.5, FPLX:C has rank 1/3
        assert_eq!(gene_symbols(&g, 1.0), vec!["D", "A"]);
        assert_eq!(gene_symbols(&g, 0.4), vec!["B", "D", "A"]);
    }
}
