//! Query domain entities

use serde::{Deserialize, Serialize};

/// Default number of prior conversation turns carried into a new query.
pub const DEFAULT_CONTEXT_TURNS: usize = 5;

/// One prior question/response pair of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub question: String,
    pub response: String,
}

impl HistoryTurn {
    pub fn new(question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
        }
    }
}

/// Formatted recent conversation history, injected into a new query.
///
/// Bounded to the most recent `limit` turns; insertion order is
/// chronological. Built fresh per request and not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    turns: Vec<HistoryTurn>,
}

impl ContextBlock {
    /// Build from a chronologically ordered history, keeping only the most
    /// recent `limit` turns. Returns `None` for empty history.
    pub fn from_history(history: &[HistoryTurn], limit: usize) -> Option<Self> {
        if history.is_empty() || limit == 0 {
            return None;
        }
        let start = history.len().saturating_sub(limit);
        Some(Self {
            turns: history[start..].to_vec(),
        })
    }

    pub fn turns(&self) -> &[HistoryTurn] {
        &self.turns
    }

    /// Render as a labeled two-line block per turn, chronological order.
    pub fn render(&self) -> String {
        let mut out = String::from("chat history:\n\n");
        for turn in &self.turns {
            out.push_str(&format!(
                "\nQuestion: {}\nResponse: {}\n",
                turn.question, turn.response
            ));
        }
        out
    }
}

/// The raw user question plus an optional formatted context block.
///
/// Immutable once constructed; lives for the duration of one request.
#[derive(Debug, Clone)]
pub struct UserQuery {
    text: String,
    context: Option<String>,
}

impl UserQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: &ContextBlock) -> Self {
        self.context = Some(context.render());
        self
    }

    /// The raw question as the user typed it.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The question with its context block, as handed to the specialist.
    pub fn full_text(&self) -> String {
        match &self.context {
            Some(context) => format!("user query:\n{}\n\n{}\n", self.text, context),
            None => format!("user query:\n{}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(n: usize) -> HistoryTurn {
        HistoryTurn::new(format!("q{n}"), format!("r{n}"))
    }

    #[test]
    fn test_empty_history_builds_no_block() {
        assert_eq!(ContextBlock::from_history(&[], DEFAULT_CONTEXT_TURNS), None);
    }

    #[test]
    fn test_context_bounded_to_most_recent() {
        let history: Vec<HistoryTurn> = (1..=8).map(turn).collect();
        let block = ContextBlock::from_history(&history, 5).unwrap();
        assert_eq!(block.turns().len(), 5);
        // Oldest retained turn is q4; chronological order preserved
        assert_eq!(block.turns()[0].question, "q4");
        assert_eq!(block.turns()[4].question, "q8");
    }

    #[test]
    fn test_context_render_format() {
        let history = vec![HistoryTurn::new("What is INC1?", "INC1 is open.")];
        let block = ContextBlock::from_history(&history, 5).unwrap();
        let rendered = block.render();
        assert!(rendered.starts_with("chat history:\n"));
        assert!(rendered.contains("Question: What is INC1?\n"));
        assert!(rendered.contains("Response: INC1 is open.\n"));
    }

    #[test]
    fn test_query_without_context() {
        let query = UserQuery::new("Show all open incidents");
        assert_eq!(query.full_text(), "user query:\nShow all open incidents");
    }

    #[test]
    fn test_query_with_context() {
        let history = vec![turn(1)];
        let block = ContextBlock::from_history(&history, 5).unwrap();
        let query = UserQuery::new("And severity?").with_context(&block);
        let full = query.full_text();
        assert!(full.starts_with("user query:\nAnd severity?\n\n"));
        assert!(full.contains("chat history:"));
        assert!(full.contains("Question: q1"));
    }
}
