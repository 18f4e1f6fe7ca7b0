use crate::error::AppError;
use bcrypt::{hash, verify};
use tokio::task::spawn_blocking;

const HASH_COST: u32 = 12;

/// A well-formed cost-12 hash that matches no password. Checking against it lets a
/// sign-in for an unknown email spend the same bcrypt work as a real mismatch.
const DECOY_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

// Every bcrypt call runs on the blocking pool, never on an actix worker.
async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(task)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Password task failed: {}", e)))?
}

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    run_blocking(move || {
        hash(password, HASH_COST)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    })
    .await
}

pub async fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed_password = hashed_password.to_owned();
    run_blocking(move || {
        verify(password, &hashed_password).map_err(|e| {
            AppError::InternalServerError(format!("Failed to verify password: {}", e))
        })
    })
    .await
}

/// Burns one bcrypt verification without a stored hash to compare against.
pub async fn verify_against_decoy(password: &str) {
    let _ = verify_password(password, DECOY_HASH).await;
}
