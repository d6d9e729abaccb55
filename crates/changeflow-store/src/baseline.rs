//! The baseline registry: the engine's reference-timestamp provider.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use changeflow_types::SubjectId;

use crate::error::StoreError;

/// Operations on the `baselines` table.
pub struct Baselines<'a> {
    pool: &'a PgPool,
}

impl<'a> Baselines<'a> {
    /// Create a baseline registry bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Return the subject's last recorded baseline.
    ///
    /// A missing baseline **fails** with [`StoreError::NoBaseline`] rather
    /// than returning a default: reduction without a reference point would
    /// silently cover the subject's entire history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoBaseline`] if the subject has no baseline,
    /// or [`StoreError::Postgres`] if the query fails.
    pub async fn last_baseline(&self, subject: SubjectId) -> Result<DateTime<Utc>, StoreError> {
        let analyzed_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r"SELECT analyzed_at FROM baselines WHERE subject_id = $1",
        )
        .bind(subject.into_inner())
        .fetch_optional(self.pool)
        .await?;

        analyzed_at.ok_or(StoreError::NoBaseline { subject })
    }

    /// Record (or move forward) the subject's baseline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the upsert fails.
    pub async fn record(
        &self,
        subject: SubjectId,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO baselines (subject_id, analyzed_at)
              VALUES ($1, $2)
              ON CONFLICT (subject_id) DO UPDATE SET analyzed_at = EXCLUDED.analyzed_at",
        )
        .bind(subject.into_inner())
        .bind(analyzed_at)
        .execute(self.pool)
        .await?;

        tracing::debug!(subject = %subject, %analyzed_at, "Recorded baseline");
        Ok(())
    }
}
