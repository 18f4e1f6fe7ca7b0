use std::env;
use std::fmt;

/// Where accounts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// SMTP settings. Present only when `MAIL_HOST` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    /// Required for `StoreBackend::Postgres`.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    /// Base of the activation and reset links sent by email.
    pub frontend_url: String,
    pub version: String,
    pub mail: Option<MailConfig>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, value) => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store = match get("STORE").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::Invalid("STORE", other.to_string())),
        };

        let database_url = get("DATABASE_URL");
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let jwt_secret = get("JWT_SECRET_KEY").ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(port) => port
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT", port))?,
            None => 8000,
        };

        let mail = match get("MAIL_HOST") {
            Some(host) => {
                let port = match get("MAIL_PORT") {
                    Some(port) => port
                        .parse()
                        .map_err(|_| ConfigError::Invalid("MAIL_PORT", port))?,
                    None => 587,
                };
                Some(MailConfig {
                    host,
                    port,
                    username: get("MAIL_EMAIL").ok_or(ConfigError::Missing("MAIL_EMAIL"))?,
                    password: get("MAIL_APP_PASSWORD")
                        .ok_or(ConfigError::Missing("MAIL_APP_PASSWORD"))?,
                    from: get("MAIL_FROM").unwrap_or_else(|| "no-reply@kickof.com".to_string()),
                })
            }
            None => None,
        };

        Ok(Self {
            store,
            database_url,
            jwt_secret,
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            frontend_url: get("FRONTEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            version: get("VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            mail,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn activation_url(&self) -> String {
        format!("{}/activate/", self.frontend_url)
    }

    pub fn reset_password_url(&self) -> String {
        format!("{}/reset-password/", self.frontend_url)
    }
}
