use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use log::debug;
use std::sync::Arc;

use super::token::{TokenError, TokenService};
use crate::error::AppError;
use crate::models::PublicUser;
use crate::store::UserStore;

/// The outcome of authenticating a request.
#[derive(Debug, Clone)]
pub struct Session {
    /// The presented token, or a freshly issued one when `renewed` is set.
    pub token: String,
    pub renewed: bool,
    pub user: PublicUser,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// The header must have exactly two space-separated parts; the scheme is matched
/// case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed authorization header".into()))?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(*token)
        }
        _ => Err(AppError::Unauthorized(
            "Authorization header must be 'Bearer <token>'".into(),
        )),
    }
}

/// Turns a bearer token into the current account, renewing expired sessions.
///
/// A token whose signature verifies but whose `exp` has passed is replaced by a new
/// token for the same identity. A token that fails signature or claim parsing has no
/// trustworthy identity and is rejected outright. Only activated, enabled accounts
/// resolve; anything else is reported as not found.
#[derive(Clone)]
pub struct SessionResolver {
    tokens: TokenService,
    users: Arc<dyn UserStore>,
}

impl SessionResolver {
    pub fn new(tokens: TokenService, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Session, AppError> {
        let token = bearer_token(headers)?;
        self.resolve_token(token).await
    }

    pub async fn resolve_token(&self, token: &str) -> Result<Session, AppError> {
        let (email, token, renewed) = match self.tokens.verify(token) {
            Ok(claims) => (claims.email, token.to_string(), false),
            Err(TokenError::Expired(claims)) => {
                debug!("Renewing expired session for {}", claims.email);
                let fresh = self.tokens.issue(&claims.email)?;
                (claims.email, fresh, true)
            }
            Err(err) => return Err(err.into()),
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|user| user.active && user.status)
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(Session {
            token,
            renewed,
            user: user.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::store::MemoryUserStore;
    use actix_web::http::header::HeaderValue;
    use chrono::{Duration, Utc};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    async fn resolver_with_user(email: &str) -> (SessionResolver, TokenService) {
        let mut user = User::new("Test".into(), email.into(), "hash".into());
        user.active = true;
        user.status = true;
        resolver_with(user).await
    }

    async fn resolver_with(user: User) -> (SessionResolver, TokenService) {
        let store = MemoryUserStore::new();
        store.insert(&user).await.unwrap();
        let tokens = TokenService::new(b"session_test_secret");
        (SessionResolver::new(tokens.clone(), Arc::new(store)), tokens)
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(&headers_with("bEaReR abc")).unwrap(), "abc");

        for bad in ["abc", "Basic abc", "Bearer", "Bearer ", "Bearer a b", "Bearer  abc"] {
            assert!(
                matches!(bearer_token(&headers_with(bad)), Err(AppError::Unauthorized(_))),
                "header {:?} should be rejected",
                bad
            );
        }

        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[actix_rt::test]
    async fn test_valid_token_resolves_without_renewal() {
        let (resolver, tokens) = resolver_with_user("alice@example.com").await;
        let token = tokens.issue("alice@example.com").unwrap();

        let session = resolver
            .resolve(&headers_with(&format!("Bearer {}", token)))
            .await
            .unwrap();

        assert!(!session.renewed);
        assert_eq!(session.token, token);
        assert_eq!(session.user.email, "alice@example.com");
    }

    #[actix_rt::test]
    async fn test_expired_token_is_renewed() {
        let (resolver, tokens) = resolver_with_user("alice@example.com").await;
        let stale = tokens
            .issue_at("alice@example.com", Utc::now() - Duration::hours(25))
            .unwrap();

        let session = resolver.resolve_token(&stale).await.unwrap();

        assert!(session.renewed);
        assert_ne!(session.token, stale);
        assert_eq!(
            tokens.verify(&session.token).unwrap().email,
            "alice@example.com"
        );
    }

    #[actix_rt::test]
    async fn test_forged_token_is_not_renewed() {
        let (resolver, _) = resolver_with_user("alice@example.com").await;
        let forged = TokenService::new(b"attacker_secret")
            .issue_at("alice@example.com", Utc::now() - Duration::hours(25))
            .unwrap();

        assert!(matches!(
            resolver.resolve_token(&forged).await,
            Err(AppError::InvalidToken(_))
        ));
        assert!(matches!(
            resolver.resolve_token("garbage").await,
            Err(AppError::InvalidToken(_))
        ));
    }

    #[actix_rt::test]
    async fn test_unknown_account_is_not_found() {
        let (resolver, tokens) = resolver_with_user("alice@example.com").await;
        let token = tokens.issue("ghost@example.com").unwrap();

        assert!(matches!(
            resolver.resolve_token(&token).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_inactive_or_disabled_account_is_not_found() {
        let pending = User::new("Test".into(), "new@example.com".into(), "hash".into());
        let (resolver, tokens) = resolver_with(pending).await;
        let token = tokens.issue("new@example.com").unwrap();
        assert!(matches!(
            resolver.resolve_token(&token).await,
            Err(AppError::NotFound(_))
        ));

        let mut disabled = User::new("Test".into(), "off@example.com".into(), "hash".into());
        disabled.active = true;
        let (resolver, tokens) = resolver_with(disabled).await;
        let stale = tokens
            .issue_at("off@example.com", Utc::now() - Duration::hours(25))
            .unwrap();
        assert!(matches!(
            resolver.resolve_token(&stale).await,
            Err(AppError::NotFound(_))
        ));
    }
}
