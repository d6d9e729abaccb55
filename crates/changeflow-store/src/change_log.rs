//! The append-only change log: the engine's event source.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use changeflow_types::{ChangeEvent, ChangeKind, EntityKey, SubjectId};

use crate::error::StoreError;

/// Default batch size for change-log inserts.
const DEFAULT_BATCH_SIZE: usize = 100;

/// Operations on the `change_log` table.
pub struct ChangeLog<'a> {
    pool: &'a PgPool,
    batch_size: usize,
}

impl<'a> ChangeLog<'a> {
    /// Create a change log bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the batch size for inserts.
    #[must_use]
    pub const fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Batch-append events to the change log.
    ///
    /// Each batch is a single multi-row INSERT (UNNEST) wrapped in a
    /// transaction, so either the whole chunk is committed or none of it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn append(&self, events: &[ChangeEvent<ChangeKind>]) -> Result<(), StoreError> {
        if events.is_empty() {
            return Ok(());
        }

        for chunk in events.chunks(self.batch_size) {
            let mut tx = self.pool.begin().await?;

            let len = chunk.len();
            let mut ids = Vec::with_capacity(len);
            let mut subject_ids = Vec::with_capacity(len);
            let mut entity_keys: Vec<Option<String>> = Vec::with_capacity(len);
            let mut kinds = Vec::with_capacity(len);
            let mut occurred_ats = Vec::with_capacity(len);

            for event in chunk {
                ids.push(event.id.into_inner());
                subject_ids.push(event.subject_id.into_inner());
                entity_keys.push(event.entity_key.as_ref().map(|k| k.as_str().to_owned()));
                kinds.push(event.kind.as_str().to_owned());
                occurred_ats.push(event.occurred_at);
            }

            sqlx::query(
                r"INSERT INTO change_log (id, subject_id, entity_key, kind, occurred_at)
                  SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::TEXT[], $4::TEXT[], $5::TIMESTAMPTZ[])",
            )
            .bind(&ids)
            .bind(&subject_ids)
            .bind(&entity_keys)
            .bind(&kinds)
            .bind(&occurred_ats)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
        }

        tracing::debug!(count = events.len(), "Appended change events (batch UNNEST)");
        Ok(())
    }

    /// Fetch all events for a subject since the given timestamp (inclusive).
    ///
    /// Rows come back ordered by `(occurred_at, id)`. Ids are UUID v7, so
    /// within equal timestamps the order is recording order; the engine's
    /// equal-timestamp tie-break relies on this.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails, or
    /// [`StoreError::UnknownKind`] if a stored kind string is unmappable.
    pub async fn select_since(
        &self,
        subject: SubjectId,
        since: DateTime<Utc>,
    ) -> Result<Vec<ChangeEvent<ChangeKind>>, StoreError> {
        let rows = sqlx::query_as::<_, ChangeRow>(
            r"SELECT id, subject_id, entity_key, kind, occurred_at
              FROM change_log
              WHERE subject_id = $1 AND occurred_at >= $2
              ORDER BY occurred_at, id",
        )
        .bind(subject.into_inner())
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ChangeRow::into_event).collect()
    }
}

/// A row from the `change_log` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChangeRow {
    /// Change record identifier.
    pub id: Uuid,
    /// Owning subject.
    pub subject_id: Uuid,
    /// Entity key, if the change carried one.
    pub entity_key: Option<String>,
    /// Kind as its canonical storage string.
    pub kind: String,
    /// When the change occurred.
    pub occurred_at: DateTime<Utc>,
}

impl ChangeRow {
    /// Convert a stored row into a domain event.
    ///
    /// An empty stored key becomes an absent key; the engine's grouper
    /// would drop the event either way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownKind`] if the kind string is not part
    /// of the vocabulary.
    pub fn into_event(self) -> Result<ChangeEvent<ChangeKind>, StoreError> {
        let Some(kind) = kind_from_db(&self.kind) else {
            return Err(StoreError::UnknownKind(self.kind));
        };
        Ok(ChangeEvent {
            id: self.id.into(),
            subject_id: self.subject_id.into(),
            entity_key: self.entity_key.and_then(EntityKey::new),
            kind,
            occurred_at: self.occurred_at,
        })
    }
}

/// Map a storage string back to a [`ChangeKind`].
///
/// The forward direction is [`ChangeKind::as_str`].
fn kind_from_db(raw: &str) -> Option<ChangeKind> {
    match raw {
        "activated" => Some(ChangeKind::Activated),
        "deactivated" => Some(ChangeKind::Deactivated),
        "updated" => Some(ChangeKind::Updated),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity_key: Option<&str>, kind: &str) -> ChangeRow {
        ChangeRow {
            id: Uuid::now_v7(),
            subject_id: Uuid::now_v7(),
            entity_key: entity_key.map(str::to_owned),
            kind: kind.to_owned(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_event() {
        let event = row(Some("rule:S100"), "activated").into_event().ok();
        assert_eq!(
            event.as_ref().and_then(|e| e.entity_key.as_ref()).map(EntityKey::as_str),
            Some("rule:S100")
        );
        assert_eq!(event.map(|e| e.kind), Some(ChangeKind::Activated));
    }

    #[test]
    fn empty_stored_key_becomes_absent() {
        let event = row(Some(""), "updated").into_event().ok();
        assert_eq!(event.and_then(|e| e.entity_key), None);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = row(Some("rule:S100"), "renamed").into_event();
        assert!(matches!(result, Err(StoreError::UnknownKind(k)) if k == "renamed"));
    }

    #[test]
    fn kind_mapping_round_trips() {
        for kind in [
            ChangeKind::Activated,
            ChangeKind::Deactivated,
            ChangeKind::Updated,
        ] {
            assert_eq!(kind_from_db(kind.as_str()), Some(kind));
        }
    }
}
