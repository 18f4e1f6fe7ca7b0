use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness probe. Touches no collaborator, so it answers even when the store or
/// mail server is down.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(Response::new(HealthReport {
        status: "ok",
        version: state.version.clone(),
        timestamp: Utc::now(),
    }))
}

#[get("/version")]
pub async fn version(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(Response::new(format!("KickOf Api v{}", state.version)))
}
