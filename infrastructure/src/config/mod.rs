//! Configuration loading
//!
//! TOML file merged with `OPSDESK_`-prefixed environment overrides.
//! Every field has a default so a bare install only needs secrets.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
const CONFIG_FILE: &str = "opsdesk.toml";

/// Incident database connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL
    pub url: String,
    /// Connection pool size
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/opsdesk".to_string(),
            max_connections: 5,
        }
    }
}

/// Elasticsearch cluster holding the SOP chunk index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Name of the chunk index
    pub index: String,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:9200".to_string(),
            username: None,
            password: None,
            index: "incident_sop".to_string(),
        }
    }
}

/// Embedding service endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingsConfig {
    /// OpenAI-compatible API base
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Vector dimensionality the chunk index was built with
    pub dimensions: usize,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1".to_string(),
            api_key: None,
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
        }
    }
}

/// Chat-completions service driving the specialists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
        }
    }
}

/// Request-shaping knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Prior turns carried into a new query
    pub context_turns: usize,
    /// Bound on tool-call turns per delegation
    pub max_tool_turns: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            context_turns: 5,
            max_tool_turns: 4,
        }
    }
}

/// Top-level opsdesk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsdeskConfig {
    pub database: DatabaseConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub embeddings: EmbeddingsConfig,
    pub llm: LlmConfig,
    pub chat: ChatConfig,
}

/// Loader merging defaults, the TOML file, and environment overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence, lowest to highest: built-in defaults, the TOML file
    /// (`config_path` or `opsdesk.toml` in the working directory),
    /// `OPSDESK_`-prefixed environment variables with `__` separating
    /// nesting levels (e.g. `OPSDESK_DATABASE__URL`).
    pub fn load(config_path: Option<&Path>) -> Result<OpsdeskConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(OpsdeskConfig::default()));

        match config_path {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => figment = figment.merge(Toml::file(CONFIG_FILE)),
        }

        figment = figment.merge(Env::prefixed("OPSDESK_").split("__"));

        figment.extract().map_err(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpsdeskConfig::default();
        assert_eq!(config.elasticsearch.index, "incident_sop");
        assert_eq!(config.embeddings.dimensions, 384);
        assert_eq!(config.chat.context_turns, 5);
        assert_eq!(config.chat.max_tool_turns, 4);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = OpsdeskConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: OpsdeskConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.database.url, config.database.url);
        assert_eq!(parsed.llm.model, config.llm.model);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: OpsdeskConfig = toml::from_str(
            r#"
            [database]
            url = "postgres://db.internal/incidents"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.database.url, "postgres://db.internal/incidents");
        assert_eq!(parsed.database.max_connections, 5);
        assert_eq!(parsed.elasticsearch.index, "incident_sop");
    }
}
