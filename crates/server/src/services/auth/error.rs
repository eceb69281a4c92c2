//! Authentication error types.

use thiserror::Error;

use super::TokenError;
use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login body lacked a username or password.
    #[error("missing username or password")]
    MissingCredentials,

    /// Registration body lacked a username, password or email.
    #[error("missing registration fields")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] project_germany_core::EmailError),

    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username or email already registered.
    #[error("admin already exists")]
    AdminAlreadyExists,

    #[error("registration is disabled")]
    RegistrationDisabled,

    /// No `Authorization: Bearer` header.
    #[error("no token provided")]
    MissingToken,

    /// Token failed verification.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Token verified but the admin it names no longer exists.
    #[error("admin not found")]
    AdminNotFound,

    /// Signing a fresh token failed.
    #[error("failed to issue token: {0}")]
    TokenIssue(TokenError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Message shown to the client.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Please provide username and password",
            Self::MissingFields => "Please provide all fields",
            Self::InvalidEmail(_) => "Please provide a valid email address",
            Self::InvalidCredentials => "Invalid credentials",
            Self::AdminAlreadyExists => "Admin already exists",
            Self::RegistrationDisabled => "Registration is disabled",
            Self::MissingToken => "No token provided",
            Self::InvalidToken(_) => "Invalid token",
            Self::AdminNotFound => "Admin not found",
            Self::TokenIssue(_) | Self::Repository(_) | Self::PasswordHash => {
                "Server error. Please try again later."
            }
        }
    }
}
