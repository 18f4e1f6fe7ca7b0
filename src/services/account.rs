//! Account lifecycle: registration, sign-in, activation, password reset and profile
//! updates. Every operation composes the token service, the credential store and the
//! mailer; none of them touch HTTP.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{
    hash_password, password::verify_against_decoy, verify_password, LoginRequest,
    RegisterRequest, TokenService,
};
use crate::error::AppError;
use crate::mail::{MailData, MailKind, Mailer};
use crate::models::{AuthResult, ProfileUpdate, PublicUser, User};
use crate::store::UserStore;

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            users,
            tokens,
            mailer,
        }
    }

    /// Creates an inactive account and emails its activation link.
    ///
    /// A failed verification email is logged; the account is still created and the
    /// caller still gets a token.
    pub async fn register(
        &self,
        input: RegisterRequest,
        activation_url: &str,
    ) -> Result<AuthResult, AppError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::EmailExists);
        }

        let user = User::new(input.name, input.email, hash_password(&input.password).await?);
        self.users.insert(&user).await?;
        info!("Registered account {}", user.email);

        let token = self.tokens.issue(&user.email)?;
        let data = MailData {
            name: user.name.clone(),
            link: format!("{}{}", activation_url, token),
        };
        if let Err(e) = self
            .mailer
            .send(MailKind::Verification, &user.email, &data)
            .await
        {
            warn!("Failed to send verification email to {}: {}", user.email, e);
        }

        Ok(AuthResult {
            token,
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }

    /// Checks the password and records the sign-in.
    pub async fn sign_in(&self, input: LoginRequest) -> Result<AuthResult, AppError> {
        let Some(mut user) = self.users.find_by_email(&input.email).await? else {
            verify_against_decoy(&input.password).await;
            return Err(AppError::NotFound("User not found".into()));
        };

        if !verify_password(&input.password, &user.password).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.email)?;
        user.last_active = Utc::now();
        self.users.update(&user).await?;

        Ok(AuthResult {
            token,
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }

    /// Marks the account named by an activation token as active and enabled.
    /// Activating an already active account succeeds.
    pub async fn activate(&self, token: &str) -> Result<(), AppError> {
        let claims = self.tokens.verify(token)?;
        let mut user = self.find_by_email(&claims.email).await?;

        user.active = true;
        user.status = true;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        info!("Activated account {}", user.email);

        Ok(())
    }

    /// Emails a password reset link. Unlike registration, a mail failure is returned.
    pub async fn forgot_password(&self, email: &str, reset_url: &str) -> Result<(), AppError> {
        let user = self.find_by_email(email).await?;

        let token = self.tokens.issue(&user.email)?;
        let data = MailData {
            name: user.name.clone(),
            link: format!("{}{}", reset_url, token),
        };
        self.mailer
            .send(MailKind::ForgotPassword, &user.email, &data)
            .await
    }

    /// Replaces the password of the account named by a reset token.
    pub async fn update_password(&self, token: &str, password: &str) -> Result<(), AppError> {
        let claims = self.tokens.verify(token)?;
        let mut user = self.find_by_email(&claims.email).await?;

        user.password = hash_password(password).await?;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        info!("Password updated for {}", user.email);

        Ok(())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileUpdate,
    ) -> Result<PublicUser, AppError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User Not Found".into()))?;

        changes.apply(&mut user);
        self.users.update(&user).await?;

        Ok(user.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
