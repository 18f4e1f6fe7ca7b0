use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The account identity the token was issued for.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was rejected.
#[derive(Debug)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, or claims that do not parse.
    Invalid(String),
    /// The signature verified but `exp` has passed. The claims are authentic and
    /// can be used to renew the session.
    Expired(Claims),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Invalid(msg) => write!(f, "invalid token: {}", msg),
            TokenError::Expired(claims) => write!(f, "token for {} expired", claims.email),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Invalid(msg) => AppError::InvalidToken(msg),
            TokenError::Expired(_) => AppError::Expired,
        }
    }
}

/// Issues and verifies HS256 bearer tokens with the server secret.
///
/// Keys are derived once at construction; the service holds no other state, so
/// cloning it into every worker is cheap.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Issues a token for `email`, valid for 24 hours from now.
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        self.issue_at(email, Utc::now())
    }

    /// Issues a token as if the current instant were `now`.
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies `token` against the wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies the signature of `token`, then checks `now < exp`.
    ///
    /// Expiry is checked here rather than by `jsonwebtoken` so that it has no leeway
    /// and so an expired token still yields its claims.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired(claims));
        }

        Ok(claims)
    }
}
