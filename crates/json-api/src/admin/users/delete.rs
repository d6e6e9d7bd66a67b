//! Admin User Delete Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Deletion Outcome Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserDeletedResponse {
    /// Outcome message
    pub message: String,
}

/// Admin User Delete Handler
///
/// Deletes an account. Administrators cannot delete their own.
#[endpoint(
    tags("admin"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "An account cannot delete itself"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;

    state
        .app
        .users
        .delete_user(requester.uuid, user.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(UserDeletedResponse {
        message: "User deleted successfully.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{TEST_ADMIN_UUID, admin_service, state_with_users};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        admin_service(
            state_with_users(users),
            Router::with_path("admin/users/{user}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_deletes_another_account() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .withf(move |requester, user| *requester == TEST_ADMIN_UUID && *user == uuid)
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/admin/users/{uuid}"))
            .send(&make_service(users))
            .await;

        let body: UserDeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "User deleted successfully.");

        Ok(())
    }

    #[tokio::test]
    async fn test_self_deletion_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::SelfDeletion));

        let res = TestClient::delete(format!(
            "http://example.com/admin/users/{TEST_ADMIN_UUID}"
        ))
        .send(&make_service(users))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
