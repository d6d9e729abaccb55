//! The immutable change event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChangeId, EntityKey, SubjectId};
use crate::kinds::ChangeKind;

/// One recorded mutation against a subject's change log.
///
/// Events are immutable once produced and have no lifecycle beyond the
/// batch they arrive in. `entity_key` is optional because the upstream
/// system can record changes without a resolvable entity; such events are
/// excluded from reduction by the grouper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent<K = ChangeKind> {
    /// Unique identifier of this change record.
    pub id: ChangeId,
    /// The subject whose log this event belongs to.
    pub subject_id: SubjectId,
    /// The entity the change applies to, if one could be resolved.
    pub entity_key: Option<EntityKey>,
    /// The effect kind recorded for this change.
    pub kind: K,
    /// When the change occurred.
    pub occurred_at: DateTime<Utc>,
}

impl<K> ChangeEvent<K> {
    /// Create an event with a fresh [`ChangeId`] and no entity key.
    pub fn new(subject_id: SubjectId, kind: K, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: ChangeId::new(),
            subject_id,
            entity_key: None,
            kind,
            occurred_at,
        }
    }

    /// Attach an entity key.
    #[must_use]
    pub fn with_entity(mut self, key: EntityKey) -> Self {
        self.entity_key = Some(key);
        self
    }
}
