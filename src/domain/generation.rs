//! Query generation capability

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for text generation backends (OpenAI, etc.) used to turn
/// questions into database queries
#[async_trait]
pub trait QueryGenerator: Send + Sync + Debug {
    /// Generate text from a system prompt and a user prompt
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
