use std::sync::Arc;

use crate::auth::{SessionResolver, TokenService};
use crate::config::Config;
use crate::mail::Mailer;
use crate::services::AccountService;
use crate::store::UserStore;

/// Everything handlers need, built once at startup and shared read-only by every worker.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub sessions: SessionResolver,
    /// Prefix of activation links; the token is appended.
    pub activation_url: String,
    /// Prefix of password reset links; the token is appended.
    pub reset_password_url: String,
    pub version: String,
}

impl AppState {
    pub fn new(config: &Config, users: Arc<dyn UserStore>, mailer: Arc<dyn Mailer>) -> Self {
        let tokens = TokenService::new(config.jwt_secret.as_bytes());

        Self {
            accounts: AccountService::new(Arc::clone(&users), tokens.clone(), mailer),
            sessions: SessionResolver::new(tokens, users),
            activation_url: config.activation_url(),
            reset_password_url: config.reset_password_url(),
            version: config.version.clone(),
        }
    }
}
