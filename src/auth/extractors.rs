use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use super::session::Session;
use crate::error::AppError;

/// The session of the signed-in user, as resolved by `AuthMiddleware`.
///
/// Only usable on routes wrapped by the middleware; anywhere else it fails with
/// `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Session);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Session>().cloned() {
            Some(session) => ready(Ok(CurrentUser(session))),
            None => {
                let err = AppError::Unauthorized(
                    "No session on request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
