//! Query domain
//!
//! The user's question, the formatted recent-history context prepended to
//! it, and final-answer composition.

pub mod answer;
pub mod entities;

pub use answer::strip_markup;
pub use entities::{ContextBlock, HistoryTurn, UserQuery};
