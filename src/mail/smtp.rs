use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use log::{debug, error};

use super::{templates, MailData, MailKind, Mailer};
use crate::config::{ConfigError, MailConfig};
use crate::error::AppError;

/// Delivers account email over STARTTLS SMTP.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, ConfigError> {
        let from = config
            .from
            .parse()
            .map_err(|_| ConfigError::Invalid("MAIL_FROM", config.from.clone()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| ConfigError::Invalid("MAIL_HOST", format!("{}: {}", config.host, e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, kind: MailKind, to: &str, data: &MailData) -> Result<(), AppError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| AppError::MailError(format!("Invalid recipient {}: {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(kind.subject())
            .header(ContentType::TEXT_HTML)
            .body(templates::render(kind, data)?)
            .map_err(|e| AppError::MailError(format!("Failed to build message: {}", e)))?;

        match self.transport.send(message).await {
            Ok(_) => {
                debug!("{} email sent to {}", kind.template_name(), to);
                Ok(())
            }
            Err(e) => {
                error!("Could not send {} email to {}: {}", kind.template_name(), to, e);
                Err(AppError::MailError(format!("Could not send email: {}", e)))
            }
        }
    }
}
