//! `PostgreSQL` enquiry storage.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use tracing::instrument;

use project_germany_core::{EnquiryId, EnquiryStatus, Interest};

use super::{EnquiryStore, PgStore, RepositoryError};
use crate::models::enquiry::sort_interest_counts;
use crate::models::{
    Enquiry, EnquiryFilter, EnquiryPatch, EnquiryStats, InterestCount, NewEnquiry, SortField,
    SortOrder,
};

const ENQUIRY_COLUMNS: &str =
    "id, name, email, phone, interest, message, status, notes, created_at";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct EnquiryRow {
    id: EnquiryId,
    name: String,
    email: String,
    phone: String,
    interest: String,
    message: Option<String>,
    status: String,
    notes: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<EnquiryRow> for Enquiry {
    type Error = RepositoryError;

    fn try_from(row: EnquiryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            interest: parse_column(&row.interest, "interest")?,
            message: row.message,
            status: parse_column(&row.status, "status")?,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

/// Parse a `TEXT` enum column; unknown values mean the table was edited by hand.
fn parse_column<T: FromStr>(raw: &str, column: &str) -> Result<T, RepositoryError> {
    raw.parse().map_err(|_| {
        RepositoryError::DataCorruption(format!("invalid {column} in database: {raw:?}"))
    })
}

#[derive(Debug, sqlx::FromRow)]
struct StatusCountsRow {
    total: i64,
    pending: i64,
    contacted: i64,
    resolved: i64,
    recent: i64,
}

impl SortField {
    /// `ORDER BY` expression. Text columns sort bytewise, matching `MemoryStore`.
    const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => r#"name COLLATE "C""#,
            Self::Email => r#"email COLLATE "C""#,
            Self::Interest => r#"interest COLLATE "C""#,
            Self::Status => r#"status COLLATE "C""#,
        }
    }
}

impl SortOrder {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// =============================================================================
// Store
// =============================================================================

#[async_trait]
impl EnquiryStore for PgStore {
    #[instrument(skip(self, enquiry), fields(interest = %enquiry.interest))]
    async fn create(&self, enquiry: NewEnquiry) -> Result<Enquiry, RepositoryError> {
        let row = sqlx::query_as::<_, EnquiryRow>(&format!(
            r"
            INSERT INTO enquiry (name, email, phone, interest, message, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, '')
            RETURNING {ENQUIRY_COLUMNS}
            "
        ))
        .bind(&enquiry.name)
        .bind(&enquiry.email)
        .bind(&enquiry.phone)
        .bind(enquiry.interest)
        .bind(&enquiry.message)
        .bind(EnquiryStatus::Pending)
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &EnquiryFilter) -> Result<Vec<Enquiry>, RepositoryError> {
        let mut query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {ENQUIRY_COLUMNS} FROM enquiry WHERE TRUE"));

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(interest) = filter.interest {
            query.push(" AND interest = ").push_bind(interest);
        }

        // Column and direction come from closed enums, never from user text.
        let order = filter.order.keyword();
        query
            .push(" ORDER BY ")
            .push(filter.sort_by.column())
            .push(" ")
            .push(order)
            .push(", id ")
            .push(order);

        let rows = query
            .build_query_as::<EnquiryRow>()
            .fetch_all(self.pool())
            .await?;

        rows.into_iter().map(Enquiry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: EnquiryId) -> Result<Option<Enquiry>, RepositoryError> {
        let row = sqlx::query_as::<_, EnquiryRow>(&format!(
            "SELECT {ENQUIRY_COLUMNS} FROM enquiry WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Enquiry::try_from).transpose()
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: EnquiryId,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, RepositoryError> {
        let row = sqlx::query_as::<_, EnquiryRow>(&format!(
            r"
            UPDATE enquiry SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                interest = COALESCE($5, interest),
                message = CASE WHEN $9 THEN $6 ELSE message END,
                status = COALESCE($7, status),
                notes = COALESCE($8, notes)
            WHERE id = $1
            RETURNING {ENQUIRY_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(patch.interest)
        .bind(patch.message.as_ref().and_then(Option::as_deref))
        .bind(patch.status)
        .bind(&patch.notes)
        .bind(patch.message.is_some())
        .fetch_optional(self.pool())
        .await?;

        row.map(Enquiry::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EnquiryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM enquiry WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn stats(&self, recent_since: DateTime<Utc>) -> Result<EnquiryStats, RepositoryError> {
        let counts = sqlx::query_as::<_, StatusCountsRow>(
            r"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'contacted') AS contacted,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE created_at >= $1) AS recent
            FROM enquiry
            ",
        )
        .bind(recent_since)
        .fetch_one(self.pool())
        .await?;

        let by_interest = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT interest, COUNT(*) AS count
            FROM enquiry
            GROUP BY interest
            ",
        )
        .fetch_all(self.pool())
        .await?;

        let mut by_interest = by_interest
            .into_iter()
            .map(|(interest, count)| {
                Ok(InterestCount {
                    interest: parse_column::<Interest>(&interest, "interest")?,
                    count,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;
        sort_interest_counts(&mut by_interest);

        Ok(EnquiryStats {
            total: counts.total,
            pending: counts.pending,
            contacted: counts.contacted,
            resolved: counts.resolved,
            by_interest,
            recent_enquiries: counts.recent,
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(status: &str, interest: &str) -> EnquiryRow {
        EnquiryRow {
            id: EnquiryId::new(4),
            name: "Lena Vogel".to_owned(),
            email: "lena@example.com".to_owned(),
            phone: "+49 30 1234567".to_owned(),
            interest: interest.to_owned(),
            message: None,
            status: status.to_owned(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_converts_known_values() {
        let enquiry = Enquiry::try_from(row("contacted", "Language Courses")).unwrap();
        assert_eq!(enquiry.status, EnquiryStatus::Contacted);
        assert_eq!(enquiry.interest, Interest::LanguageCourses);
    }

    #[test]
    fn test_unknown_stored_values_are_data_corruption() {
        assert!(matches!(
            Enquiry::try_from(row("archived", "Other")),
            Err(RepositoryError::DataCorruption(_))
        ));
        assert!(matches!(
            Enquiry::try_from(row("pending", "Astronomy")),
            Err(RepositoryError::DataCorruption(_))
        ));
        assert!(matches!(
            parse_column::<Interest>("visa support", "interest"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
