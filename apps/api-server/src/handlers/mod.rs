//! HTTP handlers and route configuration.

mod health;
mod items;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Item routes
            .service(
                web::scope("/items")
                    .route("", web::get().to(items::list_items))
                    .route("", web::post().to(items::create_item))
                    .route("/{id}", web::get().to(items::get_item))
                    .route("/{id}", web::put().to(items::replace_item))
                    .route("/{id}", web::patch().to(items::update_item))
                    .route("/{id}", web::delete().to(items::delete_item)),
            ),
    );
}

// Extractor failures are reported as problem documents too.

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
