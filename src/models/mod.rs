pub mod response;
pub mod user;

pub use response::{AuthResult, Response};
pub use user::{ProfileUpdate, PublicUser, User};
