//! HTTP surface - router, handlers and shared state

pub mod handlers;
pub mod health;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
