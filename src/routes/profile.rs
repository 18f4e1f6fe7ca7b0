use actix_web::{get, patch, web, HttpResponse, Responder};
use validator::Validate;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{ProfileUpdate, Response},
    state::AppState,
};

/// Returns the signed-in user, without the password hash.
#[get("")]
pub async fn get_profile(current: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(Response::new(current.0.user))
}

/// Updates name, image, country or city of the signed-in user.
///
/// ## Responses:
/// - `200 OK`: `{"data": "Success"}`.
/// - `400 Bad Request`: Missing/invalid bearer token or invalid body.
/// - `404 Not Found`: The account no longer exists.
#[patch("")]
pub async fn update_profile(
    state: web::Data<AppState>,
    current: CurrentUser,
    payload: web::Json<ProfileUpdate>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    state
        .accounts
        .update_profile(current.0.user.id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(Response::new("Success")))
}
