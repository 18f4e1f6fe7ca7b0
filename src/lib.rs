#![doc = "The `kickof` library crate."]
#![doc = ""]
#![doc = "Authentication and session core of the KickOf project-management backend: bearer"]
#![doc = "token issuance and verification with lazy renewal, the account lifecycle"]
#![doc = "(registration, activation, sign-in, password reset), the credential store, the"]
#![doc = "account mailer and the HTTP routes exposing them. The binary (`main.rs`) wires"]
#![doc = "these together from the environment."]

pub mod auth;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
