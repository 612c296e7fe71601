//! API request and response types

mod error;
mod requests;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use requests::{AddRequest, AskRequest, DeleteRequest, DeleteResponse, ExecuteRequest};
