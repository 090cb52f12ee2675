//! Machine-read statements and their evidence.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Database reference key holding the raw mention text, which is not a grounding.
pub const TEXT_NAMESPACE: &str = "TEXT";

/// One citation + sentence + reader tuple backing a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Reader or database that produced the evidence.
    #[serde(default)]
    pub source_api: String,

    /// PubMed identifier of the citing document.
    #[serde(default, deserialize_with = "lenient_string")]
    pub pmid: Option<String>,

    /// Sentence the statement was read from.
    #[serde(default)]
    pub text: Option<String>,

    /// Hash of the evidence as reported by the service.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl Evidence {
    /// Create evidence from a document id, a sentence, and a source.
    pub fn new(
        pmid: impl Into<String>,
        text: impl Into<String>,
        source_api: impl Into<String>,
    ) -> Self {
        Self {
            source_api: source_api.into(),
            pmid: Some(pmid.into()),
            text: Some(text.into()),
            source_hash: None,
        }
    }

    /// Set the evidence hash.
    pub fn with_source_hash(mut self, hash: impl Into<String>) -> Self {
        self.source_hash = Some(hash.into());
        self
    }

    /// Document id, empty when absent.
    pub fn document_id(&self) -> &str {
        self.pmid.as_deref().unwrap_or("")
    }

    /// Evidence text, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A biological entity mentioned by a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Display name (usually the gene symbol).
    pub name: String,

    /// Groundings keyed by namespace.
    #[serde(default)]
    pub db_refs: IndexMap<String, Value>,
}

impl Agent {
    /// Create an ungrounded agent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_refs: IndexMap::new(),
        }
    }

    /// Add a grounding.
    pub fn with_ref(mut self, namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.db_refs
            .insert(namespace.into(), Value::String(identifier.into()));
        self
    }

    /// Get a grounding identifier as a string.
    pub fn db_ref(&self, namespace: &str) -> Option<String> {
        match self.db_refs.get(namespace)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether the agent resolves to anything beyond its mention text.
    pub fn is_grounded(&self) -> bool {
        self.db_refs
            .keys()
            .any(|ns| ns != TEXT_NAMESPACE && self.db_ref(ns).is_some())
    }
}

/// A machine-extracted relational claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Statement type, e.g. `Activation` or `Phosphorylation`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Stable identifier (UUID).
    #[serde(default)]
    pub id: String,

    /// Confidence in [0, 1].
    #[serde(default)]
    pub belief: f64,

    /// Supporting evidence, in service order.
    #[serde(default)]
    pub evidence: Vec<Evidence>,

    /// Hash shared by statements that assert the same thing.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub matches_hash: Option<String>,

    /// Subject of regulation statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subj: Option<Agent>,

    /// Object of regulation statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obj: Option<Agent>,

    /// Enzyme of modification statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enz: Option<Agent>,

    /// Substrate of modification statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Agent>,

    /// Members of a complex.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Agent>,
}

impl Statement {
    /// Create a statement with no agents or evidence.
    pub fn new(kind: impl Into<String>, id: impl Into<String>, belief: f64) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            belief,
            evidence: Vec::new(),
            matches_hash: None,
            subj: None,
            obj: None,
            enz: None,
            sub: None,
            members: Vec::new(),
        }
    }

    /// Set subject and object of a regulation statement.
    pub fn with_agents(mut self, subj: Agent, obj: Agent) -> Self {
        self.subj = Some(subj);
        self.obj = Some(obj);
        self
    }

    /// Set enzyme and substrate of a modification statement.
    pub fn with_modification(mut self, enz: Agent, sub: Agent) -> Self {
        self.enz = Some(enz);
        self.sub = Some(sub);
        self
    }

    /// Set complex members.
    pub fn with_members(mut self, members: Vec<Agent>) -> Self {
        self.members = members;
        self
    }

    /// Append an evidence record.
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    /// Set the matches hash.
    pub fn with_matches_hash(mut self, hash: impl Into<String>) -> Self {
        self.matches_hash = Some(hash.into());
        self
    }

    /// All agents in role order.
    pub fn agents(&self) -> Vec<&Agent> {
        [&self.subj, &self.obj, &self.enz, &self.sub]
            .into_iter()
            .flatten()
            .chain(self.members.iter())
            .collect()
    }

    /// Whether every agent has a verified grounding.
    pub fn is_grounded(&self) -> bool {
        self.agents().iter().all(|agent| agent.is_grounded())
    }

    /// Statement hash, empty when the service did not report one.
    pub fn hash(&self) -> &str {
        self.matches_hash.as_deref().unwrap_or("")
    }

    /// Key under which near-duplicate statements are merged.
    pub fn matches_key(&self) -> String {
        match &self.matches_hash {
            Some(hash) => hash.clone(),
            None => {
                let names: Vec<&str> = self.agents().iter().map(|a| a.name.as_str()).collect();
                format!("{}({})", self.kind, names.join(","))
            }
        }
    }
}

/// Accept strings, numbers, or null where the service is inconsistent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
