//! Elasticsearch kNN search adapter.
//!
//! Issues a `_search` request with a `knn` clause against one named index
//! holding SOP document chunks embedded under `content_embedding`.

use async_trait::async_trait;
use opsdesk_application::ports::vector_search::{ChunkHit, SearchError, VectorSearchPort};
use serde::Deserialize;
use tracing::debug;

/// Vector field the chunk embeddings are indexed under.
const EMBEDDING_FIELD: &str = "content_embedding";

/// Elasticsearch-backed implementation of [`VectorSearchPort`].
pub struct ElasticVectorSearch {
    client: reqwest::Client,
    base_url: String,
    index: String,
    credentials: Option<(String, String)>,
}

impl ElasticVectorSearch {
    /// Create an adapter scoped to `index` on the cluster at `base_url`.
    pub fn new(base_url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            index: index.into(),
            credentials: None,
        }
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: HitSource,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HitSource {
    content: String,
    chunk_id: String,
    source: String,
}

#[async_trait]
impl VectorSearchPort for ElasticVectorSearch {
    async fn knn(
        &self,
        vector: &[f32],
        k: usize,
        num_candidates: usize,
    ) -> Result<Vec<ChunkHit>, SearchError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);
        let body = serde_json::json!({
            "knn": {
                "field": EMBEDDING_FIELD,
                "query_vector": vector,
                "k": k,
                "num_candidates": num_candidates,
            },
            "fields": ["content", "chunk_id", "source"],
            "_source": ["content", "chunk_id", "source"],
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::SearchFailed(format!(
                "Elasticsearch error {status}: {body}"
            )));
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::SearchFailed(e.to_string()))?;

        debug!(hits = result.hits.hits.len(), index = %self.index, "knn search complete");

        Ok(result
            .hits
            .hits
            .into_iter()
            .map(|hit| ChunkHit {
                content: hit.source.content,
                chunk_id: hit.source.chunk_id,
                source: hit.source.source,
            })
            .collect())
    }
}
