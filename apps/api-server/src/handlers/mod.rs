//! HTTP handlers and route configuration.

mod categories;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_config, path_config, query_config};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        // Public routes
        .route("/", web::get().to(health::greeting))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::index))
                .route("", web::post().to(posts::store))
                .route("/{id}", web::get().to(posts::show))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::destroy)),
        )
        .service(
            web::scope("/categories")
                .route("", web::get().to(categories::index))
                .route("", web::post().to(categories::store))
                .route("/{id}", web::get().to(categories::show))
                .route("/{id}", web::put().to(categories::update))
                .route("/{id}", web::delete().to(categories::destroy)),
        );
}
