//! Infrastructure layer - concrete adapters and services

pub mod database;
pub mod generation;
pub mod http_client;
pub mod logging;
pub mod services;
pub mod vector;
