//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/v1/posts")
                .route("", web::get().to(posts::index))
                .route("", web::post().to(posts::store))
                // Static segments before `{id}`
                .route("/trashed", web::get().to(posts::trashed))
                .route("/restore-all", web::post().to(posts::restore_all))
                .route("/{id}", web::get().to(posts::show))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::patch().to(posts::update))
                .route("/{id}", web::delete().to(posts::destroy))
                .route("/{id}/restore", web::post().to(posts::restore))
                .route("/{id}/force", web::delete().to(posts::force_delete)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        let message = match &err {
            error::JsonPayloadError::ContentType => "The request body must be JSON.".to_string(),
            other => format!("Malformed JSON body: {}", other),
        };
        AppError::Unprocessable(message).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Unprocessable(format!("Invalid query string: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Post not found.".to_string()).into())
}
