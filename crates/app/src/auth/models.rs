//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::auth::SessionTokenVersion;

/// The user a bearer token resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub admin: bool,
}

/// Session row joined with its owner, used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    /// Token format/hash version.
    pub version: SessionTokenVersion,

    /// Keyed HMAC verifier for the token secret material.
    pub token_hash: String,

    /// The owning user.
    pub user: AuthenticatedUser,
}

/// Session token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionTokenMetadata {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New session token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSessionToken {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Session issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSessionToken {
    pub token: String,
    pub metadata: SessionTokenMetadata,
}
