pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

use serde::Deserialize;
use validator::Validate;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::{AuthMiddleware, REFRESHED_TOKEN_HEADER};
pub use password::{hash_password, verify_password};
pub use session::{bearer_token, Session, SessionResolver};
pub use token::{Claims, TokenError, TokenService};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name. Between 1 and 100 characters.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Must be at least 5 characters long.
    #[validate(length(min = 5))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Completes a password reset with the token from the emailed link.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 5))]
    pub password: String,
}
