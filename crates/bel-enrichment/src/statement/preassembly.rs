//! Corpus-level preassembly and statement filters.

use indexmap::IndexMap;
use tracing::debug;

use super::model::Statement;

/// Merges near-duplicate statements before any rows are built.
pub trait Preassembler {
    /// Return the assembled corpus. The input is left untouched.
    fn run_preassembly(&self, statements: &[Statement]) -> Vec<Statement>;
}

/// Merge statements that share a matches key.
///
/// The first occurrence keeps its position and identifier; later duplicates
/// contribute their evidence and can raise the belief.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashPreassembler;

impl Preassembler for HashPreassembler {
    fn run_preassembly(&self, statements: &[Statement]) -> Vec<Statement> {
        let mut merged: IndexMap<String, Statement> = IndexMap::new();

        for statement in statements {
            match merged.get_mut(&statement.matches_key()) {
                Some(existing) => {
                    existing.evidence.extend(statement.evidence.iter().cloned());
                    existing.belief = existing.belief.max(statement.belief);
                }
                None => {
                    merged.insert(statement.matches_key(), statement.clone());
                }
            }
        }

        debug!(
            before = statements.len(),
            after = merged.len(),
            "preassembled statements"
        );
        merged.into_values().collect()
    }
}

/// Keep statements whose belief is at least `minimum_belief`.
pub fn filter_belief(statements: Vec<Statement>, minimum_belief: f64) -> Vec<Statement> {
    statements
        .into_iter()
        .filter(|s| s.belief >= minimum_belief)
        .collect()
}

/// Keep statements whose agents are all grounded.
pub fn filter_grounded_only(statements: Vec<Statement>) -> Vec<Statement> {
    statements.into_iter().filter(Statement::is_grounded).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{Agent, Evidence};

    fn activation(id: &str, belief: f64, hash: &str) -> Statement {
        Statement::new("Activation", id, belief)
            .with_agents(Agent::new("A"), Agent::new("B"))
            .with_matches_hash(hash)
            .with_evidence(Evidence::new(id, "text", "reach"))
    }

    #[test]
    fn test_merges_duplicates_in_first_seen_order() {
        let statements = vec![
            activation("a", 0.4, "1"),
            activation("b", 0.9, "2"),
            activation("c", 0.7, "1"),
        ];

        let assembled = HashPreassembler.run_preassembly(&statements);

        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0].id, "a");
        assert_eq!(assembled[0].evidence.len(), 2);
        assert_eq!(assembled[0].belief, 0.7);
        assert_eq!(assembled[1].id, "b");
        // input untouched
        assert_eq!(statements[0].evidence.len(), 1);
    }

    #[test]
    fn test_filter_belief_is_inclusive() {
        let statements = vec![activation("a", 0.5, "1"), activation("b", 0.5 - 1e-9, "2")];
        let kept = filter_belief(statements, 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
    }

    #[test]
    fn test_filter_grounded_only() {
        let grounded = Statement::new("Activation", "g", 0.5).with_agents(
            Agent::new("A").with_ref("HGNC", "1"),
            Agent::new("B").with_ref("UP", "P1"),
        );
        let ungrounded = activation("u", 0.5, "3");
        let kept = filter_grounded_only(vec![grounded, ungrounded]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "g");
    }
}
