//! Auth service.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sha2::Sha256;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, AuthenticatedUser, IssuedSessionToken, SessionKey, SessionTokenVersion,
        build_verifier_input, format_session_token, generate_session_token_secret,
        models::NewSessionToken, parse_session_token, repository::PgAuthRepository,
        token::{decode_hex, encode_hex},
    },
    database::Db,
};

type HmacSha256 = Hmac<Sha256>;

/// Sessions expire after thirty days, matching the durable slot lifetime on
/// the client.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    db: Db,
    key: SessionKey,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, key: SessionKey) -> Self {
        Self {
            repository: PgAuthRepository::new(),
            db,
            key,
        }
    }

    /// Issue a new session token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if HMAC computation or database insertion fails.
    pub async fn issue_session_token(
        &self,
        user_uuid: Uuid,
    ) -> Result<IssuedSessionToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_token_secret();
        let token = format_session_token(token_uuid, version, &secret);

        let verifier_input = build_verifier_input(&token_uuid, version, &user_uuid, &secret);
        let token_hash = self.verifier_hex(&verifier_input)?;

        let mut tx = self.db.begin().await?;

        let metadata = self
            .repository
            .create_session_token(
                &mut tx,
                &NewSessionToken {
                    uuid: token_uuid,
                    user_uuid,
                    version,
                    token_hash,
                    expires_at: Some(Timestamp::now() + SESSION_TTL),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(IssuedSessionToken { token, metadata })
    }

    fn verifier_hex(&self, input: &[u8]) -> Result<String, AuthServiceError> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|_| AuthServiceError::Verifier)?;

        mac.update(input);

        Ok(encode_hex(&mac.finalize().into_bytes()))
    }

    fn verify(&self, input: &[u8], stored_hash: &str) -> Result<bool, AuthServiceError> {
        let Some(stored) = decode_hex(stored_hash) else {
            return Err(AuthServiceError::Verifier);
        };

        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|_| AuthServiceError::Verifier)?;

        mac.update(input);

        Ok(mac.verify_slice(&stored).is_ok())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let parsed_token =
            parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, parsed_token.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input = build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &session.user.uuid,
            &parsed_token.secret,
        );

        if !self.verify(&verifier_input, &session.token_hash)? {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on
        // this write.
        if let Err(touch_error) = self
            .repository
            .touch_session_last_used(&mut tx, parsed_token.token_uuid)
            .await
        {
            tracing::debug!("failed to touch session last-used: {touch_error}");
        }

        tx.commit().await?;

        Ok(session.user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it authenticates.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
