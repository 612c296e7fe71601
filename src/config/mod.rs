//! Application configuration loading

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, DatabaseConfig, LlmConfig, LogFormat, LoggingConfig, ServerConfig,
};
