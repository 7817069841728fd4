//! Query routing domain
//!
//! Deterministic classification of user questions into the intent handled
//! by exactly one specialist agent.

mod signals;

pub use signals::{classify_intent, QueryIntent};
