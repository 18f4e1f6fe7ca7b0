//! Persistence for user accounts.
//!
//! Account logic only ever talks to the [`UserStore`] trait; the backing store is picked
//! once at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Inserts a new account. Fails with `AppError::EmailExists` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), AppError>;

    /// Overwrites the account with the same id. Last writer wins.
    async fn update(&self, user: &User) -> Result<(), AppError>;
}
