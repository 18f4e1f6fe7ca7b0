//! Outbound account email: activation and password-reset links.

pub mod smtp;
pub mod templates;

use async_trait::async_trait;
use log::info;
use serde::Serialize;

use crate::error::AppError;

pub use smtp::SmtpMailer;

/// Which account email is being sent. Each kind has its own template and subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Verification,
    ForgotPassword,
}

impl MailKind {
    pub fn template_name(self) -> &'static str {
        match self {
            MailKind::Verification => "verification",
            MailKind::ForgotPassword => "forgot-password",
        }
    }

    pub fn subject(self) -> &'static str {
        match self {
            MailKind::Verification => "Please Confirm Your Email",
            MailKind::ForgotPassword => "Reset Your Password",
        }
    }
}

/// Values substituted into the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailData {
    pub name: String,
    pub link: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, kind: MailKind, to: &str, data: &MailData) -> Result<(), AppError>;
}

/// Writes the link to the log instead of delivering mail. Selected when no SMTP host
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, kind: MailKind, to: &str, data: &MailData) -> Result<(), AppError> {
        info!(
            "{} email for {} not delivered (no SMTP configured): {}",
            kind.template_name(),
            to,
            data.link
        );
        Ok(())
    }
}
