//! Lexical reduction of retrieved memories
//!
//! Vector search finds the right meetings; this picks the right lines out of
//! them. Lines sharing a word with the query win. If none do, every body line
//! is offered instead, since an approximate answer beats an empty one.

use tracing::debug;

/// Returned when the retrieved entries hold nothing but headers
pub const NOTHING_SPECIFIC: &str =
    "I searched my memory but couldn’t find anything specific about that.";

const HEADER_PREFIXES: [&str; 2] = ["meeting summary", "tasks:"];
const DEADLINE_MARKERS: [&str; 4] = ["(", "deadline", "by", "due"];

/// Outcome of reducing retrieved entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// Newline-joined context lines for the synthesizer
    Context(String),
    /// No body lines at all
    NothingFound,
}

/// Reduces retrieved entries to a few relevant lines
#[derive(Debug, Clone)]
pub struct RetrievalReducer {
    max_lines: usize,
}

impl RetrievalReducer {
    pub fn new(max_lines: usize) -> Self {
        RetrievalReducer { max_lines }
    }

    pub fn reduce<S: AsRef<str>>(&self, entries: &[S], query: &str) -> Reduction {
        let mut lines = select_lines(entries, query);

        if lines.is_empty() {
            debug!("No line matched the query, falling back to all body lines");
            lines = body_lines(entries);
        }

        if lines.is_empty() {
            return Reduction::NothingFound;
        }

        lines.truncate(self.max_lines);
        Reduction::Context(lines.join("\n"))
    }
}

impl Default for RetrievalReducer {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Body lines that share a token with the query, or carry a deadline marker
/// when the query asks about deadlines. Entry order, then line order.
pub fn select_lines<S: AsRef<str>>(entries: &[S], query: &str) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();
    let asks_deadline = query_lower.contains("deadline");

    let mut kept: Vec<String> = Vec::new();
    for line in entries.iter().flat_map(|e| e.as_ref().split('\n')) {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_header(trimmed) {
            continue;
        }

        let lower = trimmed.to_lowercase();
        let token_match = tokens.iter().any(|t| lower.contains(t));
        let deadline_match = asks_deadline
            && DEADLINE_MARKERS.iter().any(|m| lower.contains(m))
            && !kept.iter().any(|k| k == trimmed);

        if token_match || deadline_match {
            kept.push(trimmed.to_string());
        }
    }
    kept
}

/// Every non-header, non-blank line
fn body_lines<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.as_ref().split('\n'))
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_header(l))
        .map(String::from)
        .collect()
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_PREFIXES.iter().any(|p| lower.starts_with(p))
}
