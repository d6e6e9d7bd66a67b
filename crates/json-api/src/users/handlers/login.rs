//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::models::Credentials;

use crate::{
    extensions::*, state::State, users::errors::into_status_error,
    users::responses::SignedInResponse,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Handler
///
/// Verifies credentials and returns the profile with a fresh bearer token.
#[endpoint(
    tags("users"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Email or password not recognised"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SignedInResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let signed_in = state
        .app
        .users
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(signed_in.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::users::{
        MockUsersService, UsersServiceError, models::SignedInUser,
    };

    use crate::test_helpers::{make_user, service, state_with_users};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        service(
            state_with_users(users),
            Router::with_path("users/login").post(handler),
        )
    }

    #[tokio::test]
    async fn test_login_success_returns_token() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut users = MockUsersService::new();

        users
            .expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "ada@example.com" && credentials.password == "pw"
            })
            .return_once(move |_| {
                Ok(SignedInUser {
                    user: make_user(uuid),
                    token: "sf_v1_test.token".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "ada@example.com", "password": "pw" }))
            .send(&make_service(users))
            .await;

        let body: SignedInResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid);
        assert_eq!(body.token, "sf_v1_test.token");
        assert!(!body.admin);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_credentials_return_401() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_login()
            .once()
            .return_once(|_| Err(UsersServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
