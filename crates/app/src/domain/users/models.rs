//! User Models

use jiff::Timestamp;
use uuid::Uuid;

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration payload. The password arrives raw and is hashed with
/// Argon2id before storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account update payload. A `None` password keeps the current one.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user: User,
    pub token: String,
}

/// User row joined with its password hash, used during login.
#[derive(Debug, Clone)]
pub(crate) struct PasswordRecord {
    pub user: User,
    pub password_hash: String,
}
