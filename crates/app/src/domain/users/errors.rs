//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthServiceError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("email or password not recognised")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound,

    #[error("an account cannot delete itself")]
    SelfDeletion,

    #[error("password hashing failed")]
    Password,

    #[error("session issuance failed")]
    Auth(#[source] AuthServiceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            _ => Self::Sql(error),
        }
    }
}

impl From<AuthServiceError> for UsersServiceError {
    fn from(error: AuthServiceError) -> Self {
        Self::Auth(error)
    }
}
