//! Lambda relay between an API Gateway chat endpoint and a FastAPI text
//! generation service.

pub mod config;
pub mod generation;
pub mod handler;
pub mod http;
pub mod models;
pub mod schema;
pub mod utils;

pub use config::Config;
pub use handler::{Relay, function_handler};
