//! Account Update Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::models::AccountUpdate;

use crate::{
    extensions::*, state::State, users::errors::into_status_error,
    users::responses::SignedInResponse,
};

/// Account Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountUpdateRequest {
    pub name: String,
    pub email: String,

    /// Omit to keep the current password.
    pub password: Option<String>,
}

impl From<AccountUpdateRequest> for AccountUpdate {
    fn from(request: AccountUpdateRequest) -> Self {
        AccountUpdate {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Account Update Handler
///
/// Updates the signed-in account's profile and re-issues its token.
#[endpoint(
    tags("users"),
    summary = "Update Account",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Account updated"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AccountUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<SignedInResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let signed_in = state
        .app
        .users
        .update_account(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(signed_in.into()))
}
