use crate::{
    auth::{ForgotPasswordRequest, LoginRequest, RegisterRequest, UpdatePasswordRequest},
    error::AppError,
    models::Response,
    state::AppState,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates an inactive account, emails its activation link and returns a token.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let result = state
        .accounts
        .register(payload.into_inner(), &state.activation_url)
        .await?;

    Ok(HttpResponse::Ok().json(Response::new(result)))
}

/// Login user
///
/// Authenticates a user and returns an authentication token.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let result = state.accounts.sign_in(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(Response::new(result)))
}

/// Returns the presented bearer token, or a fresh one if it had expired.
#[get("/refresh-token")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let session = state.sessions.resolve(req.headers()).await?;

    Ok(HttpResponse::Ok().json(Response::new(session.token)))
}

#[post("/activate/{token}")]
pub async fn activate(
    state: web::Data<AppState>,
    token: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.accounts.activate(&token).await?;

    Ok(HttpResponse::Ok().json(Response::new("Activation Success")))
}

#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    state
        .accounts
        .forgot_password(&payload.email, &state.reset_password_url)
        .await?;

    Ok(HttpResponse::Ok().json(Response::new("Reset email has been sent")))
}

#[post("/update-password")]
pub async fn update_password(
    state: web::Data<AppState>,
    payload: web::Json<UpdatePasswordRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    state
        .accounts
        .update_password(&payload.token, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(Response::new("Success")))
}
