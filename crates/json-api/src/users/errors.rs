//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::EmailTaken => {
            StatusError::conflict().brief("An account with this email already exists.")
        }
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Email or password not recognised.")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found."),
        UsersServiceError::SelfDeletion => {
            StatusError::bad_request().brief("An account cannot delete itself.")
        }
        UsersServiceError::Password => {
            error!("password hashing failed");

            StatusError::internal_server_error()
        }
        UsersServiceError::Auth(source) => {
            error!("session issuance failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("users storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
