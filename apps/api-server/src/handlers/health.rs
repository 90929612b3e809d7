//! Greeting and health check endpoints.

use actix_web::HttpResponse;
use serde::Serialize;

use quill_shared::dto::GreetingResponse;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// GET /
pub async fn greeting() -> HttpResponse {
    HttpResponse::Ok().json(GreetingResponse {
        message: "hello world".to_string(),
        status: 200,
    })
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
