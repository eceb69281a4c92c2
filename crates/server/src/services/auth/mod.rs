//! Admin authentication service.
//!
//! Provides argon2 password login, registration and bearer token checks.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenError, TokenSigner};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::instrument;

use project_germany_core::Email;

use crate::db::{AdminStore, RepositoryError};
use crate::models::Admin;

/// Authentication service.
///
/// Borrows the admin store and token signer from application state for the
/// duration of one request.
pub struct AuthService<'a> {
    admins: &'a dyn AdminStore,
    tokens: &'a TokenSigner,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admins: &'a dyn AdminStore, tokens: &'a TokenSigner) -> Self {
        Self { admins, tokens }
    }

    /// Login with username and password, returning a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is absent or blank.
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or the
    /// password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<(String, Admin), AuthError> {
        let username = username.map(str::trim).filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());
        let (Some(username), Some(password)) = (username, password) else {
            return Err(AuthError::MissingCredentials);
        };

        let (admin, password_hash) = self
            .admins
            .get_with_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(admin.id).map_err(AuthError::TokenIssue)?;
        tracing::info!(admin_id = %admin.id, "Admin logged in");

        Ok((token, admin))
    }

    /// Register a new admin.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is absent or blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::AdminAlreadyExists` if the username or email is taken.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        email: Option<&str>,
    ) -> Result<Admin, AuthError> {
        let username = username.map(str::trim).filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        let (Some(username), Some(password), Some(email)) = (username, password, email) else {
            return Err(AuthError::MissingFields);
        };

        let email = Email::parse(email)?;

        if self.admins.exists(username, email.as_str()).await? {
            return Err(AuthError::AdminAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        // The existence check races with concurrent registrations; the unique
        // constraints settle it.
        let admin = self
            .admins
            .create_admin(username, email.as_str(), &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AdminAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(admin_id = %admin.id, "Admin registered");
        Ok(admin)
    }

    /// Resolve a bearer token to the admin it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if verification fails and
    /// `AuthError::AdminNotFound` if the admin has since been removed.
    pub async fn authenticate(&self, token: &str) -> Result<Admin, AuthError> {
        let claims = self.tokens.verify(token)?;

        self.admins
            .get_by_id(claims.admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or an unparsable hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};
    use secrecy::SecretString;

    use super::*;
    use crate::db::MemoryStore;

    fn signer() -> TokenSigner {
        TokenSigner::new(
            &SecretString::from("u7#Rk2!pW9@xL4$mQ8%vT1^zN6&cB3*f"),
            Duration::hours(24),
        )
    }

    #[test]
    fn test_hash_is_salted_phc_string() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password("correct horse", &first).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &first),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unparsable_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_then_login_then_authenticate() {
        let store = MemoryStore::new();
        let tokens = signer();
        let auth = AuthService::new(&store, &tokens);

        let registered = auth
            .register(Some("admin"), Some("s3cret-pass"), Some("admin@example.com"))
            .await
            .unwrap();
        let (token, admin) = auth.login(Some("admin"), Some("s3cret-pass")).await.unwrap();
        assert_eq!(admin, registered);

        let authenticated = auth.authenticate(&token).await.unwrap();
        assert_eq!(authenticated.id, registered.id);
        assert_eq!(authenticated.username, "admin");
    }

    #[tokio::test]
    async fn test_login_does_not_reveal_which_part_failed() {
        let store = MemoryStore::new();
        let tokens = signer();
        let auth = AuthService::new(&store, &tokens);
        auth.register(Some("admin"), Some("s3cret-pass"), Some("admin@example.com"))
            .await
            .unwrap();

        let unknown = auth.login(Some("nobody"), Some("s3cret-pass")).await;
        let wrong = auth.login(Some("admin"), Some("guess")).await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let store = MemoryStore::new();
        let tokens = signer();
        let auth = AuthService::new(&store, &tokens);

        for (username, password) in [
            (None, Some("pw")),
            (Some("admin"), None),
            (Some("   "), Some("pw")),
            (Some("admin"), Some("")),
        ] {
            assert!(matches!(
                auth.login(username, password).await,
                Err(AuthError::MissingCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_bad_input() {
        let store = MemoryStore::new();
        let tokens = signer();
        let auth = AuthService::new(&store, &tokens);
        auth.register(Some("admin"), Some("pw"), Some("admin@example.com"))
            .await
            .unwrap();

        assert!(matches!(
            auth.register(Some("admin"), Some("pw"), Some("other@example.com"))
                .await,
            Err(AuthError::AdminAlreadyExists)
        ));
        assert!(matches!(
            auth.register(Some("other"), Some("pw"), Some("admin@example.com"))
                .await,
            Err(AuthError::AdminAlreadyExists)
        ));
        assert!(matches!(
            auth.register(Some("other"), Some("pw"), None).await,
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            auth.register(Some("other"), Some("pw"), Some("not-an-email"))
                .await,
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_expired_and_orphaned_tokens() {
        let store = MemoryStore::new();
        let tokens = signer();
        let auth = AuthService::new(&store, &tokens);
        let admin = auth
            .register(Some("admin"), Some("pw"), Some("admin@example.com"))
            .await
            .unwrap();

        let long_ago = (Utc::now() - Duration::hours(25)).timestamp();
        let expired = tokens.issue_at(admin.id, long_ago).unwrap();
        assert!(matches!(
            auth.authenticate(&expired).await,
            Err(AuthError::InvalidToken(TokenError::Expired))
        ));

        let orphaned = tokens
            .issue(project_germany_core::AdminId::new(999))
            .unwrap();
        assert!(matches!(
            auth.authenticate(&orphaned).await,
            Err(AuthError::AdminNotFound)
        ));
    }
}
