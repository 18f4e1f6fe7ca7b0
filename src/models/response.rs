use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The JSON envelope every endpoint answers with, on success and on error alike.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: T,
}

impl<T> Response<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Payload returned after a successful registration or sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResult {
    /// The bearer token for subsequent requests.
    pub token: String,
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
