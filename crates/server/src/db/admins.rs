//! `PostgreSQL` admin account storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use project_germany_core::{AdminId, Email};

use super::{AdminStore, PgStore, RepositoryError, map_unique_violation};
use crate::models::Admin;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::new(row.id),
            username: row.username,
            email,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminWithHashRow {
    #[sqlx(flatten)]
    admin: AdminRow,
    password_hash: String,
}

// =============================================================================
// Store
// =============================================================================

#[async_trait]
impl AdminStore for PgStore {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, email, created_at FROM admin_user WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Admin::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn get_with_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminWithHashRow>(
            r"
            SELECT id, username, email, created_at, password_hash
            FROM admin_user
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some((Admin::try_from(row.admin)?, row.password_hash))),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn exists(&self, username: &str, email: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM admin_user WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self, password_hash))]
    async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admin_user (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, created_at
            ",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_unique_violation(e, "admin already exists"))?;

        row.try_into()
    }

    #[instrument(skip(self, password_hash))]
    async fn set_password(&self, id: AdminId, password_hash: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admin_user SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
