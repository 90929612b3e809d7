//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use api_server::observability::RequestIdMiddleware;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppConfig, AppState, handlers};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    // Missing database settings are fatal
    let config = AppConfig::from_env().inspect_err(|e| tracing::error!("{}", e))?;

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::connect(&config)
        .await
        .inspect_err(|e| tracing::error!("Could not connect to database: {:#}", e))?;

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
