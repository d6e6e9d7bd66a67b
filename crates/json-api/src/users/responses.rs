//! User response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::models::{SignedInUser, User};

/// User Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Account email
    pub email: String,

    /// Whether the user may use the back office
    pub admin: bool,

    /// The date and time the account was created
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            admin: user.admin,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Signed-In User Response
///
/// The profile plus the bearer token the client presents on later calls.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignedInResponse {
    /// Bearer token for the session
    pub token: String,

    /// The unique identifier of the user
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Account email
    pub email: String,

    /// Whether the user may use the back office
    pub admin: bool,
}

impl From<SignedInUser> for SignedInResponse {
    fn from(signed_in: SignedInUser) -> Self {
        Self {
            token: signed_in.token,
            uuid: signed_in.user.uuid,
            name: signed_in.user.name,
            email: signed_in.user.email,
            admin: signed_in.user.admin,
        }
    }
}
