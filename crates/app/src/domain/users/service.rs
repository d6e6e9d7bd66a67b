//! Users service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{AccountUpdate, Credentials, NewUser, SignedInUser, User},
        password,
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    auth: PgAuthService,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, auth: PgAuthService) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            auth,
        }
    }

    async fn sign_in(&self, user: User) -> Result<SignedInUser, UsersServiceError> {
        let issued = self.auth.issue_session_token(user.uuid).await?;

        Ok(SignedInUser {
            user,
            token: issued.token,
        })
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<SignedInUser, UsersServiceError> {
        let password_hash =
            password::hash_password(&user.password).ok_or(UsersServiceError::Password)?;

        let mut tx = self.db.begin().await.map_err(UsersServiceError::Sql)?;

        let created = self
            .repository
            .create_user(&mut tx, &user.name, &user.email, &password_hash)
            .await?;

        tx.commit().await.map_err(UsersServiceError::Sql)?;

        self.sign_in(created).await
    }

    async fn login(&self, credentials: Credentials) -> Result<SignedInUser, UsersServiceError> {
        let mut tx = self.db.begin().await.map_err(UsersServiceError::Sql)?;

        let record = self
            .repository
            .find_user_by_email(&mut tx, &credentials.email)
            .await?;

        tx.commit().await.map_err(UsersServiceError::Sql)?;

        // One error for unknown email and wrong password; login must not
        // reveal which one failed.
        let record = record.ok_or(UsersServiceError::InvalidCredentials)?;

        if !password::verify_password(&record.password_hash, &credentials.password) {
            return Err(UsersServiceError::InvalidCredentials);
        }

        self.sign_in(record.user).await
    }

    async fn update_account(
        &self,
        user: Uuid,
        update: AccountUpdate,
    ) -> Result<SignedInUser, UsersServiceError> {
        let password_hash = match update.password.as_deref() {
            Some(password) => {
                Some(password::hash_password(password).ok_or(UsersServiceError::Password)?)
            }
            None => None,
        };

        let mut tx = self.db.begin().await.map_err(UsersServiceError::Sql)?;

        let updated = self
            .repository
            .update_account(
                &mut tx,
                user,
                &update.name,
                &update.email,
                password_hash.as_deref(),
            )
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await.map_err(UsersServiceError::Sql)?;

        self.sign_in(updated).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin().await.map_err(UsersServiceError::Sql)?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await.map_err(UsersServiceError::Sql)?;

        Ok(users)
    }

    async fn set_admin(&self, user: Uuid, admin: bool) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await.map_err(UsersServiceError::Sql)?;

        let updated = self
            .repository
            .set_admin(&mut tx, user, admin)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await.map_err(UsersServiceError::Sql)?;

        Ok(updated)
    }

    async fn delete_user(&self, requester: Uuid, user: Uuid) -> Result<(), UsersServiceError> {
        if requester == user {
            return Err(UsersServiceError::SelfDeletion);
        }

        let mut tx = self.db.begin().await.map_err(UsersServiceError::Sql)?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await.map_err(UsersServiceError::Sql)?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, user: NewUser) -> Result<SignedInUser, UsersServiceError>;

    /// Verify credentials and sign the account in.
    async fn login(&self, credentials: Credentials) -> Result<SignedInUser, UsersServiceError>;

    /// Update the signed-in account's profile, re-issuing its token.
    async fn update_account(
        &self,
        user: Uuid,
        update: AccountUpdate,
    ) -> Result<SignedInUser, UsersServiceError>;

    /// All accounts, for the back office.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Grant or revoke back-office access.
    async fn set_admin(&self, user: Uuid, admin: bool) -> Result<User, UsersServiceError>;

    /// Delete an account. Admins cannot delete their own.
    async fn delete_user(&self, requester: Uuid, user: Uuid) -> Result<(), UsersServiceError>;
}
