//! Embedding adapters.

mod http;

pub use http::HttpEmbeddingProvider;
