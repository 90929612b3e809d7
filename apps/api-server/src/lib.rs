//! # Quill API Server
//!
//! Routes, handlers and wiring for the posts/categories HTTP API. The binary in
//! `main.rs` only reads configuration and starts the server.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
