//! Admin Users Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, state::State, users::errors::into_status_error,
    users::responses::UserResponse,
};

/// Admin Users Index Handler
///
/// Every registered account.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
