//! Line-oriented statement parsing into the curated graph.

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::relation::{Citation, Relation};

use super::graph::{CurationGraph, GraphEdge};

/// A BEL term: a function applied to a parenthesized argument list.
static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*\(.*\)$").unwrap());

/// Citation, evidence, and annotations that qualify one parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseContext {
    pub citation: Citation,
    pub evidence: String,
    pub annotations: IndexMap<String, String>,
    pub line_number: usize,
}

/// A recoverable problem with a single statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParseWarning {
    /// The statement is not well formed.
    Syntax {
        line: usize,
        text: String,
        position: usize,
    },
    /// The statement is well formed but not meaningful.
    Semantic {
        line: usize,
        text: String,
        message: String,
    },
}

impl ParseWarning {
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::Syntax { line, .. } | ParseWarning::Semantic { line, .. } => *line,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ParseWarning::Syntax { text, .. } | ParseWarning::Semantic { text, .. } => text,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::Syntax { text, position, .. } => {
                write!(f, "syntax error at position {} in \"{}\"", position, text)
            }
            ParseWarning::Semantic { text, message, .. } => {
                write!(f, "{} in \"{}\"", message, text)
            }
        }
    }
}

/// Parses one textual statement and adds the resulting edge to a graph.
pub trait StatementParser {
    /// Parse `text` qualified by `context`. A warning means nothing was added.
    fn parse(
        &self,
        text: &str,
        context: &ParseContext,
        graph: &mut CurationGraph,
    ) -> Result<(), ParseWarning>;
}

/// Splits `subject relation object` on a top-level relation keyword.
///
/// Terms are only checked for balanced parentheses and quotes and a function
/// prefix; their contents are taken as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationParser;

impl RelationParser {
    pub fn new() -> Self {
        Self
    }

    /// Split on top-level whitespace, returning each token with its byte offset.
    fn tokenize(text: &str, line: usize) -> Result<Vec<(usize, &str)>, ParseWarning> {
        let syntax = |position| ParseWarning::Syntax {
            line,
            text: text.to_string(),
            position,
        };

        let mut tokens = Vec::new();
        let mut depth = 0usize;
        let mut in_quotes = false;
        let mut escaped = false;
        let mut start: Option<usize> = None;

        for (i, ch) in text.char_indices() {
            if in_quotes {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_quotes = false,
                    _ => {}
                }
                continue;
            }

            match ch {
                '"' => {
                    in_quotes = true;
                    start.get_or_insert(i);
                }
                '(' => {
                    depth += 1;
                    start.get_or_insert(i);
                }
                ')' => {
                    depth = depth.checked_sub(1).ok_or_else(|| syntax(i))?;
                }
                c if c.is_whitespace() && depth == 0 => {
                    if let Some(s) = start.take() {
                        tokens.push((s, &text[s..i]));
                    }
                }
                _ => {
                    start.get_or_insert(i);
                }
            }
        }

        if in_quotes || depth > 0 {
            return Err(syntax(text.len()));
        }
        if let Some(s) = start {
            tokens.push((s, &text[s..]));
        }
        Ok(tokens)
    }

    fn check_term(term: &str, offset: usize, text: &str, line: usize) -> Result<(), ParseWarning> {
        if TERM.is_match(term) {
            Ok(())
        } else {
            Err(ParseWarning::Syntax {
                line,
                text: text.to_string(),
                position: offset,
            })
        }
    }
}

impl StatementParser for RelationParser {
    fn parse(
        &self,
        text: &str,
        context: &ParseContext,
        graph: &mut CurationGraph,
    ) -> Result<(), ParseWarning> {
        let line = context.line_number;
        let text = text.trim();
        let tokens = Self::tokenize(text, line)?;

        if tokens.len() != 3 {
            return Err(ParseWarning::Syntax {
                line,
                text: text.to_string(),
                position: tokens.get(1).map_or(text.len(), |(offset, _)| *offset),
            });
        }

        let (subject_offset, subject) = tokens[0];
        let (_, keyword) = tokens[1];
        let (object_offset, object) = tokens[2];

        Self::check_term(subject, subject_offset, text, line)?;
        Self::check_term(object, object_offset, text, line)?;

        let relation: Relation = keyword.parse().map_err(|message| ParseWarning::Semantic {
            line,
            text: text.to_string(),
            message,
        })?;

        graph.add_edge(GraphEdge {
            subject: subject.to_string(),
            relation,
            object: object.to_string(),
            citation: Some(context.citation.clone()),
            evidence: Some(context.evidence.clone()),
            annotations: context.annotations.clone(),
            line: Some(line),
        });
        Ok(())
    }
}
