//! Signed bearer tokens for admin sessions.
//!
//! Tokens are HS256 JWTs whose payload carries `{"adminId", "iat", "exp"}` in
//! Unix seconds. Nothing is stored server-side; a token is valid until `exp`
//! as long as the signing secret is unchanged.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use project_germany_core::AdminId;

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not three base64url segments, or a segment is not the expected JSON.
    #[error("malformed token")]
    Malformed,
    /// Header names an algorithm other than HS256.
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,
    #[error("invalid token signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    /// The claims could not be encoded.
    #[error("token signing failed")]
    Signing,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                Self::UnsupportedAlgorithm
            }
            _ => Self::Malformed,
        }
    }
}

/// Token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "adminId")]
    pub admin_id: AdminId,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expires at, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies admin tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `admin_id` valid from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the claims cannot be encoded.
    pub fn issue(&self, admin_id: AdminId) -> Result<String, TokenError> {
        self.issue_at(admin_id, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    ///
    /// # Errors
    ///
    /// See [`TokenSigner::issue`].
    pub fn issue_at(&self, admin_id: AdminId, now: i64) -> Result<String, TokenError> {
        let claims = Claims {
            admin_id,
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] if the token is malformed, was not signed with
    /// this secret, or has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &validation(true))?;
        Ok(data.claims)
    }

    /// Verify a token as if the current time were `now` (Unix seconds).
    ///
    /// # Errors
    ///
    /// See [`TokenSigner::verify`].
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &validation(false))?.claims;
        if now > claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// HS256 only, no leeway. `check_exp` compares `exp` against the wall clock.
fn validation(check_exp: bool) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = check_exp;
    validation.set_required_spec_claims(&["exp", "iat"]);
    validation
}
