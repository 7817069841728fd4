//! Regex-based intent classification.
//!
//! Uses two-tier scoring: keyword hits and phrase matches for each intent.
//! Routing is decided here, not by the language model, so it can be tested
//! without one.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// The two routing destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    /// Live incident records: lookups by id, status, severity, engineer,
    /// SLA-breach flag, or incident metrics.
    IncidentData,
    /// Procedures and documentation: escalation paths, how-to questions,
    /// SLA definitions, best practices.
    Procedure,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryIntent::IncidentData => "incident_data",
            QueryIntent::Procedure => "procedure",
        }
    }
}

impl std::fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a query string into a [`QueryIntent`].
///
/// Scores each intent from regex signals; the higher score wins. An exact
/// tie routes to [`QueryIntent::IncidentData`] — a question carrying any
/// live-incident signal is better served by real data than by
/// documentation. Queries with no signals at all fall back to
/// [`QueryIntent::Procedure`] via its base score.
pub fn classify_intent(query: &str) -> QueryIntent {
    let lower = query.to_lowercase();
    let data = score_incident_data(&lower);
    let procedure = score_procedure(&lower);

    if data >= procedure {
        QueryIntent::IncidentData
    } else {
        QueryIntent::Procedure
    }
}

// --- Regex patterns (compiled once) ---

static INCIDENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\binc\d+\b").unwrap());

static DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(status|severity|p[1-4]|open|closed|in\s+progress|resolved|on[\s-]?call|engineer|owner\s+team|assigned|handling|mttr|breached?|metrics?)\b").unwrap()
});

static DATA_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(what\s+is\s+the\s+status\s+of|who\s+is\s+(handling|assigned)|show\s+(all|me\s+all)|which\s+incidents|list\s+(all\s+)?incidents|how\s+many\s+incidents)").unwrap()
});

static PROCEDURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(procedures?|escalat(e|ion|ed)|sops?|runbooks?|guidelines?|best\s+practices?|policy|policies|definitions?|documentation|sla)\b").unwrap()
});

static PROCEDURE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(how\s+(do|should|to|can)\b|what\s+is\s+the\s+(procedure|process|sla)|what\s+are\s+the\s+steps|escalation\s+(path|procedure|process)|standard\s+operating)").unwrap()
});

// --- Scoring functions ---

fn score_incident_data(query: &str) -> f32 {
    let mut score = 0.0;
    if INCIDENT_ID_RE.is_match(query) {
        score += 25.0;
    }
    if DATA_RE.is_match(query) {
        score += 10.0;
    }
    if DATA_PHRASE_RE.is_match(query) {
        score += 15.0;
    }
    score
}

fn score_procedure(query: &str) -> f32 {
    // Base score: zero-signal queries fall back to documentation search
    let mut score = 4.0;
    if PROCEDURE_RE.is_match(query) {
        score += 10.0;
    }
    if PROCEDURE_PHRASE_RE.is_match(query) {
        score += 15.0;
    }
    score
}
