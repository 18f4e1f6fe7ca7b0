pub mod auth;
pub mod health;
pub mod profile;

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::web;

use crate::auth::{AuthMiddleware, REFRESHED_TOKEN_HEADER};
use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(health::health).service(
        web::scope("/api")
            .service(health::version)
            .service(auth::register)
            .service(auth::login)
            .service(auth::refresh_token)
            .service(auth::activate)
            .service(auth::forgot_password)
            .service(auth::update_password)
            .service(
                web::scope("/profile")
                    .wrap(AuthMiddleware)
                    .service(profile::get_profile)
                    .service(profile::update_profile),
            ),
    );
}

/// Malformed or incomplete JSON bodies are reported like any other validation failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["POST", "GET", "PATCH", "OPTIONS", "DELETE"])
        .allowed_headers(vec![
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ])
        .expose_headers(vec![
            header::CONTENT_LENGTH,
            HeaderName::from_static(REFRESHED_TOKEN_HEADER),
        ])
        .supports_credentials()
        .max_age(12 * 60 * 60)
}
