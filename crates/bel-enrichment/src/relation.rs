//! BEL relation vocabulary and citations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Citation type used for every curated edge.
pub const CITATION_TYPE_PUBMED: &str = "PubMed";

/// Relations that can appear between two BEL terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Increases,
    DirectlyIncreases,
    Decreases,
    DirectlyDecreases,
    Regulates,
    CausesNoChange,
    PositiveCorrelation,
    NegativeCorrelation,
    Association,
    HasComponent,
    HasVariant,
    HasReactant,
    HasProduct,
    TranscribedTo,
    TranslatedTo,
    IsA,
    EquivalentTo,
}

impl Relation {
    /// All relations, in the order they are tried when splitting a statement.
    pub const ALL: [Relation; 17] = [
        Relation::Increases,
        Relation::DirectlyIncreases,
        Relation::Decreases,
        Relation::DirectlyDecreases,
        Relation::Regulates,
        Relation::CausesNoChange,
        Relation::PositiveCorrelation,
        Relation::NegativeCorrelation,
        Relation::Association,
        Relation::HasComponent,
        Relation::HasVariant,
        Relation::HasReactant,
        Relation::HasProduct,
        Relation::TranscribedTo,
        Relation::TranslatedTo,
        Relation::IsA,
        Relation::EquivalentTo,
    ];

    /// BEL keyword for this relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Increases => "increases",
            Relation::DirectlyIncreases => "directlyIncreases",
            Relation::Decreases => "decreases",
            Relation::DirectlyDecreases => "directlyDecreases",
            Relation::Regulates => "regulates",
            Relation::CausesNoChange => "causesNoChange",
            Relation::PositiveCorrelation => "positiveCorrelation",
            Relation::NegativeCorrelation => "negativeCorrelation",
            Relation::Association => "association",
            Relation::HasComponent => "hasComponent",
            Relation::HasVariant => "hasVariant",
            Relation::HasReactant => "hasReactant",
            Relation::HasProduct => "hasProduct",
            Relation::TranscribedTo => "transcribedTo",
            Relation::TranslatedTo => "translatedTo",
            Relation::IsA => "isA",
            Relation::EquivalentTo => "equivalentTo",
        }
    }

    /// Structural relations that never carry a citation or evidence.
    pub fn is_unqualified(&self) -> bool {
        matches!(
            self,
            Relation::HasComponent
                | Relation::HasVariant
                | Relation::HasReactant
                | Relation::HasProduct
                | Relation::TranscribedTo
                | Relation::TranslatedTo
                | Relation::IsA
                | Relation::EquivalentTo
        )
    }

    pub fn is_causal_increase(&self) -> bool {
        matches!(self, Relation::Increases | Relation::DirectlyIncreases)
    }

    pub fn is_causal_decrease(&self) -> bool {
        matches!(self, Relation::Decreases | Relation::DirectlyDecreases)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Relation::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .or(match s {
                "->" | "=>" => Some(Relation::Increases),
                "-|" | "=|" => Some(Relation::Decreases),
                "--" => Some(Relation::Association),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown relation: {}", s))
    }
}

/// A literature citation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    /// Citation database, e.g. `PubMed`.
    #[serde(rename = "type")]
    pub namespace: String,
    /// Identifier within the database.
    pub reference: String,
}

impl Citation {
    /// Create a PubMed citation.
    pub fn pubmed(reference: impl Into<String>) -> Self {
        Self {
            namespace: CITATION_TYPE_PUBMED.to_string(),
            reference: reference.into(),
        }
    }
}
