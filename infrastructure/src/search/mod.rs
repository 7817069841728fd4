//! Vector search adapters.

mod elastic;

pub use elastic::ElasticVectorSearch;
