#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use kickof::config::Config;
use kickof::mail::{MailData, MailKind, Mailer};
use kickof::store::MemoryUserStore;
use kickof::{AppError, AppState};

pub const JWT_SECRET: &str = "integration_test_secret";
pub const FRONTEND_URL: &str = "http://localhost:3000";

/// Keeps every email instead of sending it; optionally reports every send as failed.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<(MailKind, String, MailData)>>,
}

impl RecordingMailer {
    pub fn last_link(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|(_, _, data)| data.link.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, kind: MailKind, to: &str, data: &MailData) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((kind, to.to_string(), data.clone()));
        if self.fail {
            return Err(AppError::MailError("smtp unavailable".into()));
        }
        Ok(())
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<MemoryUserStore>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORE" => Some("memory".to_string()),
        "JWT_SECRET_KEY" => Some(JWT_SECRET.to_string()),
        "FRONTEND_URL" => Some(FRONTEND_URL.to_string()),
        "VERSION" => Some("1.0.0".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn context_with(mailer: RecordingMailer) -> TestContext {
    let users = Arc::new(MemoryUserStore::new());
    let mailer = Arc::new(mailer);
    let state = web::Data::new(AppState::new(&test_config(), users.clone(), mailer.clone()));
    TestContext {
        state,
        users,
        mailer,
    }
}

pub fn context() -> TestContext {
    context_with(RecordingMailer::default())
}

/// Strips the link prefix the mailer was given, leaving the token.
pub fn token_from_link(link: &str) -> String {
    link.rsplit('/').next().unwrap_or_default().to_string()
}
