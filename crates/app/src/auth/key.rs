//! Server-side HMAC key for session-token verifiers.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::token::decode_hex;

/// Minimum key material, matching the HMAC-SHA-256 block strength.
pub const SESSION_KEY_MIN_BYTES: usize = 32;

/// Secret key used to compute session-token verifiers.
///
/// The database stores only HMAC outputs keyed by this value, so a leaked
/// token table cannot be replayed without the key.
#[derive(Clone)]
pub struct SessionKey {
    bytes: Vec<u8>,
}

impl SessionKey {
    /// Parse a key from its hex encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the encoding is not hex or the decoded key is
    /// shorter than [`SESSION_KEY_MIN_BYTES`].
    pub fn from_hex(hex: &str) -> Result<Self, SessionKeyError> {
        let bytes = decode_hex(hex.trim()).ok_or(SessionKeyError::InvalidEncoding)?;

        if bytes.len() < SESSION_KEY_MIN_BYTES {
            return Err(SessionKeyError::TooShort {
                bytes: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    #[must_use]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum SessionKeyError {
    #[error("session key is not valid hex")]
    InvalidEncoding,

    #[error("session key is too short: {bytes} bytes, need at least 32")]
    TooShort { bytes: usize },
}
