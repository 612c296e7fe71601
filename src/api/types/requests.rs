use serde::{Deserialize, Serialize};

/// Body for `/ask` and `/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Body for `/execute`
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub query: String,
}

/// Body for `/add` - a speculative cache insertion; the caller accepts
/// that a failing query will be evicted on first failed execution
#[derive(Debug, Clone, Deserialize)]
pub struct AddRequest {
    pub question: String,
    pub query: String,
}

/// Body for `/delete`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub query: String,
}

/// Response for `/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: usize,
}
