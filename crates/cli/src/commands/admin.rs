//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! pg-cli admin create -u admin -e admin@example.com -p 'long passphrase'
//! SITE_ADMIN_PASSWORD='long passphrase' pg-cli admin set-password -u admin
//! ```

use thiserror::Error;

use project_germany_core::Email;
use project_germany_server::db::{AdminStore, PgStore, RepositoryError};
use project_germany_server::services::auth::{AuthError, hash_password};

use super::{ConnectError, connect};

const PASSWORD_ENV_VAR: &str = "SITE_ADMIN_PASSWORD";

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// No password flag and no `SITE_ADMIN_PASSWORD`.
    #[error("No password given: pass --password or set {PASSWORD_ENV_VAR}")]
    MissingPassword,

    /// Creating an admin needs an email address.
    #[error("Admin {0} does not exist; pass --email to create it")]
    MissingEmail(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] project_germany_core::EmailError),

    /// Username or email already taken.
    #[error("Admin already exists with username {0} or email {1}")]
    AdminExists(String, String),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] AuthError),
}

/// Create a new admin.
///
/// # Errors
///
/// Returns an error if the password is missing, the email is invalid, or the
/// username or email is already taken.
pub async fn create(
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<(), AdminError> {
    let password = resolve_password(password)?;
    let email = Email::parse(email)?;

    let store = PgStore::new(connect().await?);
    if store.exists(username, email.as_str()).await? {
        return Err(AdminError::AdminExists(
            username.to_owned(),
            email.into_inner(),
        ));
    }

    let admin = insert(&store, username, &email, &password).await?;
    tracing::info!(
        "Admin created successfully! ID: {}, Username: {}, Email: {}",
        admin.id,
        admin.username,
        admin.email
    );
    Ok(())
}

/// Set an admin's password, creating the admin when the username is unknown.
///
/// # Errors
///
/// Returns an error if the password is missing, or the admin does not exist
/// and no valid email was given.
pub async fn set_password(
    username: &str,
    email: Option<&str>,
    password: Option<String>,
) -> Result<(), AdminError> {
    let password = resolve_password(password)?;
    let store = PgStore::new(connect().await?);

    if let Some((admin, _)) = store.get_with_password_hash(username).await? {
        let password_hash = hash_password(&password)?;
        store.set_password(admin.id, &password_hash).await?;
        tracing::info!("Password updated for admin {} (ID {})", admin.username, admin.id);
        return Ok(());
    }

    let email = email.ok_or_else(|| AdminError::MissingEmail(username.to_owned()))?;
    let email = Email::parse(email)?;
    let admin = insert(&store, username, &email, &password).await?;
    tracing::info!(
        "Admin {} did not exist and was created with ID {}",
        admin.username,
        admin.id
    );
    Ok(())
}

async fn insert(
    store: &PgStore,
    username: &str,
    email: &Email,
    password: &str,
) -> Result<project_germany_server::models::Admin, AdminError> {
    let password_hash = hash_password(password)?;
    store
        .create_admin(username, email.as_str(), &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AdminError::AdminExists(username.to_owned(), email.to_string())
            }
            other => AdminError::Repository(other),
        })
}

/// The password from the flag, else from `SITE_ADMIN_PASSWORD`.
fn resolve_password(flag: Option<String>) -> Result<String, AdminError> {
    flag.or_else(|| std::env::var(PASSWORD_ENV_VAR).ok())
        .filter(|p| !p.is_empty())
        .ok_or(AdminError::MissingPassword)
}
