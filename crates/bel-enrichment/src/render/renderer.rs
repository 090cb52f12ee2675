//! Rendering statements into BEL edges.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::relation::{Citation, Relation};
use crate::statement::{Agent, Evidence, Statement, TEXT_NAMESPACE};

use super::edge::{
    RenderedEdge, ANNOTATION_EVIDENCE_HASH, ANNOTATION_SOURCE_API, ANNOTATION_STATEMENT_HASH,
    ANNOTATION_UUID,
};

/// Names that can appear unquoted in a BEL term.
static PLAIN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

/// Grounding namespaces in order of preference.
const NAMESPACE_PRIORITY: &[&str] = &[
    "HGNC", "UP", "FPLX", "CHEBI", "PUBCHEM", "GO", "MESH", TEXT_NAMESPACE,
];

/// Turns one statement into zero or more candidate edges.
pub trait EdgeRenderer {
    /// Render the statement. Edge order must be deterministic.
    fn render(&self, statement: &Statement) -> Vec<RenderedEdge>;
}

/// Renders the common regulation, modification, and complex statement types.
#[derive(Debug, Clone, Copy, Default)]
pub struct BelRenderer;

impl BelRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render an agent as a BEL term, e.g. `p(HGNC:AKT1)`.
    pub fn agent_term(agent: &Agent) -> String {
        let (namespace, name) = NAMESPACE_PRIORITY
            .iter()
            .find_map(|ns| {
                agent.db_ref(ns).map(|id| {
                    // HGNC and UniProt edges read better with the symbol
                    let name = match *ns {
                        "HGNC" | "FPLX" | TEXT_NAMESPACE => agent.name.clone(),
                        _ => id,
                    };
                    (*ns, name)
                })
            })
            .unwrap_or((TEXT_NAMESPACE, agent.name.clone()));

        let function = match namespace {
            "CHEBI" | "PUBCHEM" | "MESH" => "a",
            "GO" => "bp",
            _ => "p",
        };

        format!("{}({}:{})", function, namespace, quote(&name))
    }

    fn provenance(statement: &Statement, evidence: &Evidence) -> Vec<(&'static str, String)> {
        vec![
            (ANNOTATION_UUID, statement.id.clone()),
            (ANNOTATION_STATEMENT_HASH, statement.hash().to_string()),
            (
                ANNOTATION_EVIDENCE_HASH,
                evidence.source_hash.clone().unwrap_or_default(),
            ),
            (ANNOTATION_SOURCE_API, evidence.source_api.clone()),
        ]
    }

    /// One qualified edge per evidence record.
    fn qualified_edges(
        statement: &Statement,
        subject: &str,
        relation: Relation,
        object: &str,
    ) -> Vec<RenderedEdge> {
        statement
            .evidence
            .iter()
            .map(|evidence| {
                let mut edge = RenderedEdge::unqualified(subject, relation, object);
                if !evidence.document_id().is_empty() {
                    edge.citation = Some(Citation::pubmed(evidence.document_id()));
                }
                edge.evidence = evidence.text.clone();
                for (key, value) in Self::provenance(statement, evidence) {
                    edge = edge.with_annotation(key, value);
                }
                edge
            })
            .collect()
    }
}

impl EdgeRenderer for BelRenderer {
    fn render(&self, statement: &Statement) -> Vec<RenderedEdge> {
        let kind = statement.kind.as_str();

        if let Some((relation, activity)) = regulation(kind) {
            let (Some(subj), Some(obj)) = (&statement.subj, &statement.obj) else {
                return Vec::new();
            };
            let object = Self::agent_term(obj);
            let object = if activity {
                format!("act({})", object)
            } else {
                object
            };
            return Self::qualified_edges(statement, &Self::agent_term(subj), relation, &object);
        }

        if let Some((relation, code)) = modification(kind) {
            let Some(sub) = &statement.sub else {
                return Vec::new();
            };
            let substrate = Self::agent_term(sub);
            let modified = format!(
                "{}, pmod({}))",
                substrate.trim_end_matches(')'),
                code
            );
            let mut edges = match &statement.enz {
                Some(enz) => {
                    Self::qualified_edges(statement, &Self::agent_term(enz), relation, &modified)
                }
                None => Vec::new(),
            };
            edges.push(RenderedEdge::unqualified(
                substrate,
                Relation::HasVariant,
                modified,
            ));
            return edges;
        }

        if kind == "Complex" && statement.members.len() > 1 {
            let members: Vec<String> = statement.members.iter().map(Self::agent_term).collect();
            let complex = format!("complex({})", members.join(", "));
            return members
                .into_iter()
                .map(|member| RenderedEdge::unqualified(complex.clone(), Relation::HasComponent, member))
                .collect();
        }

        debug!(kind, id = %statement.id, "no rendering for statement type");
        Vec::new()
    }
}

/// Relation for regulation statements, and whether the object is an activity.
fn regulation(kind: &str) -> Option<(Relation, bool)> {
    match kind {
        "Activation" => Some((Relation::Increases, true)),
        "Inhibition" => Some((Relation::Decreases, true)),
        "IncreaseAmount" => Some((Relation::Increases, false)),
        "DecreaseAmount" => Some((Relation::Decreases, false)),
        _ => None,
    }
}

/// Relation and protein modification code for modification statements.
fn modification(kind: &str) -> Option<(Relation, &'static str)> {
    let (relation, base) = match kind.strip_prefix("De") {
        Some(rest) => (Relation::Decreases, rest.to_lowercase()),
        None => (Relation::Increases, kind.to_lowercase()),
    };
    let code = match base.as_str() {
        "phosphorylation" => "Ph",
        "ubiquitination" => "Ub",
        "acetylation" => "Ac",
        "methylation" => "Me",
        "sumoylation" => "Sumo",
        "glycosylation" => "Glyco",
        "hydroxylation" => "Hy",
        "farnesylation" => "Farn",
        _ => return None,
    };
    Some((relation, code))
}

fn quote(name: &str) -> String {
    if PLAIN_NAME.is_match(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\\\""))
    }
}
