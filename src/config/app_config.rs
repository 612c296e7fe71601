use serde::Deserialize;

use crate::domain::SemanticCacheConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Target database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Dialect name used to phrase generation prompts (e.g. "sqlite3",
    /// "mysql", "postgres")
    pub dialect: String,
    /// Connection URL; the scheme picks the sqlx driver
    pub url: String,
    /// Optional pre-supplied schema-introspection query; generated when
    /// absent
    #[serde(default)]
    pub schema_query: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// LLM provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for self-hosted or proxied endpoints
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Vector index settings
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_endpoint")]
    pub endpoint: String,
    #[serde(flatten)]
    pub semantic: SemanticCacheConfig,
}

fn default_max_connections() -> u32 {
    5
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_cache_endpoint() -> String {
    "http://weaviate:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            endpoint: default_cache_endpoint(),
            semantic: SemanticCacheConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database.url.is_empty() {
            return Err(config::ConfigError::Message(
                "database.url is not set or empty".to_string(),
            ));
        }

        if self.llm.api_key.is_empty() {
            return Err(config::ConfigError::Message(
                "llm.api_key is not set or empty".to_string(),
            ));
        }

        if self.database.dialect.is_empty() {
            return Err(config::ConfigError::Message(
                "database.dialect is not set or empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "database": { "dialect": "sqlite3", "url": "sqlite://data.db" },
                "llm": { "api_key": "sk-test" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.cache.endpoint, "http://weaviate:8080");
        assert_eq!(config.cache.semantic.collection, "Default");
        assert!((config.cache.semantic.certainty - 0.92).abs() < 0.001);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.schema_query.is_none());
    }

    #[test]
    fn test_cache_section_flattens_semantic_settings() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "database": { "dialect": "mysql", "url": "mysql://db/app" },
                "llm": { "api_key": "sk-test" },
                "cache": { "endpoint": "http://localhost:8080", "collection": "Queries", "certainty": 0.8 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.cache.semantic.collection, "Queries");
        assert!((config.cache.semantic.certainty - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "database": { "dialect": "sqlite3", "url": "sqlite://data.db" },
                "llm": { "api_key": "" }
            }"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
