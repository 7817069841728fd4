//! Use cases

pub mod answer_query;
