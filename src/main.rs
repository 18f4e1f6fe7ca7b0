use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;

use kickof::config::{Config, StoreBackend};
use kickof::mail::{LogMailer, Mailer, SmtpMailer};
use kickof::store::{MemoryUserStore, PgUserStore, UserStore};
use kickof::{routes, AppState};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn connect_store(config: &Config) -> io::Result<Arc<dyn UserStore>> {
    match (config.store, config.database_url.as_deref()) {
        (StoreBackend::Memory, _) => {
            warn!("Using the in-memory user store; accounts are lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        (StoreBackend::Postgres, Some(url)) => {
            let pool = sqlx::PgPool::connect(url)
                .await
                .map_err(|e| startup_error("Unable to connect to DB", e))?;
            let store = PgUserStore::new(pool);
            store
                .migrate()
                .await
                .map_err(|e| startup_error("Unable to prepare DB", e))?;
            info!("Connected to PostgreSQL");
            Ok(Arc::new(store))
        }
        (StoreBackend::Postgres, None) => Err(startup_error(
            "Configuration",
            "DATABASE_URL must be set",
        )),
    }
}

fn build_mailer(config: &Config) -> io::Result<Arc<dyn Mailer>> {
    match &config.mail {
        Some(mail) => {
            let mailer = SmtpMailer::new(mail).map_err(|e| startup_error("Configuration", e))?;
            Ok(Arc::new(mailer))
        }
        None => {
            warn!("MAIL_HOST is not set; account emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Configuration", e))?;
    let users = connect_store(&config).await?;
    let mailer = build_mailer(&config)?;
    let state = web::Data::new(AppState::new(&config, users, mailer));

    info!("Starting KickOf server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(routes::cors())
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
