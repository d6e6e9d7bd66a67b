//! Admin User Update Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*, state::State, users::errors::into_status_error,
    users::responses::UserResponse,
};

/// Set Admin Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetAdminRequest {
    /// Whether the account may use the back office
    pub admin: bool,
}

/// Admin User Update Handler
///
/// Grants or revokes back-office access for an account.
#[endpoint(
    tags("admin"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<SetAdminRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .users
        .set_admin(user.into_inner(), json.into_inner().admin)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
