//! Repository for the `contact_messages` table.
//!
//! Every listing query shares the same parameter layout so the SQL stays
//! static:
//!
//! - `$1` -- `ILIKE` pattern of the search filter, or `NULL` for no filter
//! - `$2`, `$3` -- `created_at` and `id` of the boundary record (seek queries)
//! - last -- `LIMIT`

use contact_core::contact::{ContactSubmission, MessageFilter};
use contact_core::pagination::Seek;
use contact_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_message::ContactMessage;

/// Column list for `contact_messages` queries.
const COLUMNS: &str = "id, name, email, subject, message, consent, source, created_at";

const FILTER: &str = "($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1 OR subject ILIKE $1)";

const OLDER_THAN: &str = "(created_at < $2 OR (created_at = $2 AND id < $3))";

const NEWER_THAN: &str = "(created_at > $2 OR (created_at = $2 AND id > $3))";

/// Provides persistence operations for contact messages.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Insert a validated submission, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &ContactSubmission,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message, consent, source) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(input.consent)
            .bind(&input.source)
            .fetch_one(pool)
            .await
    }

    /// Fetch up to `limit` rows relative to `seek`.
    ///
    /// Rows come back nearest-to-boundary first: newest first for the first
    /// page and for [`Seek::Older`], oldest first for [`Seek::Newer`].
    pub async fn list_range(
        pool: &PgPool,
        filter: &MessageFilter,
        seek: Option<Seek>,
        limit: i64,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let pattern = filter.like_pattern();

        let Some(seek) = seek else {
            let query = format!(
                "SELECT {COLUMNS} FROM contact_messages WHERE {FILTER} \
                 ORDER BY created_at DESC, id DESC LIMIT $2"
            );
            return sqlx::query_as::<_, ContactMessage>(&query)
                .bind(pattern)
                .bind(limit)
                .fetch_all(pool)
                .await;
        };

        let (condition, order) = match seek {
            Seek::Older(_) => (OLDER_THAN, "created_at DESC, id DESC"),
            Seek::Newer(_) => (NEWER_THAN, "created_at ASC, id ASC"),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages WHERE {FILTER} AND {condition} \
             ORDER BY {order} LIMIT $4"
        );

        let boundary = seek.boundary();
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(pattern)
            .bind(boundary.created_at)
            .bind(boundary.id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Whether any row matching `filter` lies beyond the boundary of `seek`.
    pub async fn exists_beyond(
        pool: &PgPool,
        filter: &MessageFilter,
        seek: Seek,
    ) -> Result<bool, sqlx::Error> {
        let condition = match seek {
            Seek::Older(_) => OLDER_THAN,
            Seek::Newer(_) => NEWER_THAN,
        };
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM contact_messages WHERE {FILTER} AND {condition})"
        );

        let boundary = seek.boundary();
        sqlx::query_scalar::<_, bool>(&query)
            .bind(filter.like_pattern())
            .bind(boundary.created_at)
            .bind(boundary.id)
            .fetch_one(pool)
            .await
    }

    /// Count rows matching `filter`.
    pub async fn count(pool: &PgPool, filter: &MessageFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM contact_messages WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.like_pattern())
            .fetch_one(pool)
            .await
    }

    /// Delete the given ids. Returns the number of rows removed; unknown ids
    /// are ignored.
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
