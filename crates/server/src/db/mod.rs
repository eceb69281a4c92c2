//! Storage for enquiries and admin accounts.
//!
//! # Tables
//!
//! - `enquiry` - Submissions from the landing page form
//! - `admin_user` - Dashboard accounts (argon2 password hashes)
//!
//! # Backends
//!
//! Handlers talk to [`EnquiryStore`] and [`AdminStore`] trait objects:
//! - [`PgStore`] - `PostgreSQL`, used in production
//! - [`MemoryStore`] - in-process, used by tests and `SITE_STORAGE=memory`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p project-germany-cli -- migrate
//! ```

pub mod admins;
pub mod enquiries;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use project_germany_core::{AdminId, EnquiryId};

use crate::models::{Admin, Enquiry, EnquiryFilter, EnquiryPatch, EnquiryStats, NewEnquiry};

pub use memory::MemoryStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Enquiry persistence.
#[async_trait]
pub trait EnquiryStore: Send + Sync {
    /// Persist a new enquiry as `pending` with empty notes.
    async fn create(&self, enquiry: NewEnquiry) -> Result<Enquiry, RepositoryError>;

    /// All enquiries passing `filter`, in its order.
    async fn list(&self, filter: &EnquiryFilter) -> Result<Vec<Enquiry>, RepositoryError>;

    async fn get(&self, id: EnquiryId) -> Result<Option<Enquiry>, RepositoryError>;

    /// Apply `patch`, returning the updated record or `None` if `id` is unknown.
    async fn update(
        &self,
        id: EnquiryId,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, RepositoryError>;

    /// Remove an enquiry. Returns `false` if nothing was deleted.
    async fn delete(&self, id: EnquiryId) -> Result<bool, RepositoryError>;

    /// Aggregate counts. `recent_since` bounds `recent_enquiries` (inclusive).
    async fn stats(&self, recent_since: DateTime<Utc>) -> Result<EnquiryStats, RepositoryError>;

    /// Cheap connectivity check for the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Admin account persistence.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError>;

    /// Look up an admin and their password hash by username.
    async fn get_with_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(Admin, String)>, RepositoryError>;

    /// Whether any admin already uses `username` or `email`.
    async fn exists(&self, username: &str, email: &str) -> Result<bool, RepositoryError>;

    /// Create an admin.
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is taken.
    async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError>;

    /// Replace an admin's password hash.
    ///
    /// Returns `RepositoryError::NotFound` if the admin does not exist.
    async fn set_password(&self, id: AdminId, password_hash: &str) -> Result<(), RepositoryError>;
}

/// `PostgreSQL` backend for both stores.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
fn map_unique_violation(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(err)
}
