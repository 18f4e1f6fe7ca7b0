//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure of the session and account flows is one of its variants, so handlers,
//! middleware and services can all propagate with `?`.
//!
//! `AppError` implements `actix_web::error::ResponseError`. Every error is rendered in the
//! same `{ "data": <message> }` envelope as successful responses; the status code carries
//! the outcome class (400 for request, validation and credential problems, 404 for missing
//! accounts, 500 for infrastructure failures).

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;
use validator::ValidationErrors;

use crate::models::Response;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The request body or parameters failed to parse or validate.
    ValidationError(String),
    /// The `Authorization` header is missing or is not a `Bearer <token>` pair.
    Unauthorized(String),
    /// The token signature did not verify or its claims could not be parsed.
    InvalidToken(String),
    /// The token is authentic but its expiration instant has passed.
    Expired,
    /// Registration was attempted with an email that already has an account.
    EmailExists,
    /// The password did not match the stored hash.
    InvalidCredentials,
    /// No account (or other record) matched the lookup.
    NotFound(String),
    /// The credential store failed.
    DatabaseError(String),
    /// The outbound mail collaborator failed.
    MailError(String),
    /// Any other unexpected server-side error.
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidToken(msg) => write!(f, "Token invalid: {}", msg),
            AppError::Expired => write!(f, "Token expired"),
            AppError::EmailExists => write!(f, "Email already exists"),
            AppError::InvalidCredentials => write!(f, "Password does not match"),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::MailError(msg) => write!(f, "Mail Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into enveloped JSON `HttpResponse`s.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::Unauthorized(_)
            | AppError::InvalidToken(_)
            | AppError::Expired
            | AppError::EmailExists
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::MailError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Response::new(self.to_string()))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`, a unique-key violation on insert can only be the
/// email index and becomes `EmailExists`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::EmailExists,
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
