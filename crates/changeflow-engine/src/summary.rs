//! The engine façade: window filter, then group → resolve → aggregate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use changeflow_types::{ChangeEvent, ChangeKind, EntityKey, KindRoles, SubjectId};

use crate::aggregate::count_by_kind;
use crate::group::group_by_entity;
use crate::resolve::resolve_net_effect;
use crate::ReduceError;

/// The reduction engine façade.
///
/// Holds the kind-role configuration and composes the three pipeline stages
/// for one batch at a time. Stateless across calls; a single value can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct ChangeSummarizer<K = ChangeKind> {
    roles: KindRoles<K>,
}

impl<K: Copy + Ord> ChangeSummarizer<K> {
    /// Create a summarizer with the given kind-role configuration.
    pub const fn new(roles: KindRoles<K>) -> Self {
        Self { roles }
    }

    /// Return the kind-role configuration this summarizer reduces with.
    pub const fn roles(&self) -> &KindRoles<K> {
        &self.roles
    }

    /// Reduce a batch of events to per-kind counts of entity net effects.
    ///
    /// Events before `since` are discarded first (the window's lower bound
    /// is inclusive). The surviving events are grouped by entity, each
    /// group is resolved to a net effect, and the net effects are counted
    /// by kind. Entities whose changes cancelled out are absent from the
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::NoChanges`] when no event falls inside the
    /// window. An empty window is exceptional: callers must be able to
    /// distinguish "nothing happened" from "everything cancelled out",
    /// and the latter is the empty-map case.
    pub fn summarize(
        &self,
        subject: SubjectId,
        since: DateTime<Utc>,
        mut events: Vec<ChangeEvent<K>>,
    ) -> Result<BTreeMap<K, u64>, ReduceError> {
        events.retain(|event| event.occurred_at >= since);
        if events.is_empty() {
            return Err(ReduceError::NoChanges { subject, since });
        }

        let batch = events.len();
        let groups = group_by_entity(events);
        let grouped: usize = groups.values().map(Vec::len).sum();

        let resolutions: BTreeMap<EntityKey, Option<K>> = groups
            .iter()
            .map(|(key, group)| (key.clone(), resolve_net_effect(group, &self.roles)))
            .collect();
        let resolved = resolutions.values().filter(|r| r.is_some()).count();

        tracing::debug!(
            subject = %subject,
            batch,
            dropped = batch.saturating_sub(grouped),
            entities = groups.len(),
            resolved,
            "Reduced change batch"
        );

        Ok(count_by_kind(&resolutions))
    }
}

impl ChangeSummarizer<ChangeKind> {
    /// A summarizer wired with [`KindRoles::standard`].
    pub const fn standard() -> Self {
        Self::new(KindRoles::standard())
    }
}

#[cfg(test)]
mod tests {
    // Panicking on a malformed fixture is the correct behavior in test code.
    #![allow(clippy::unwrap_used)]

    use chrono::Duration;

    use super::*;

    fn key(raw: &str) -> EntityKey {
        EntityKey::new(raw).unwrap()
    }

    /// Build a batch from (entity, kind, seconds-after-t0) triples.
    /// `entity = ""` produces a keyless event.
    fn batch(
        subject: SubjectId,
        t0: DateTime<Utc>,
        specs: &[(&str, ChangeKind, i64)],
    ) -> Vec<ChangeEvent> {
        specs
            .iter()
            .map(|&(entity, kind, offset)| {
                let event = ChangeEvent::new(subject, kind, t0 + Duration::seconds(offset));
                match EntityKey::new(entity) {
                    Some(k) => event.with_entity(k),
                    None => event,
                }
            })
            .collect()
    }

    #[test]
    fn cancelled_toggles_yield_empty_summary() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(
            subject,
            t0,
            &[
                ("e1", ChangeKind::Activated, 0),
                ("e1", ChangeKind::Deactivated, 1),
            ],
        );
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn odd_toggles_count_latest_direction() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(
            subject,
            t0,
            &[
                ("e1", ChangeKind::Activated, 0),
                ("e1", ChangeKind::Deactivated, 1),
                ("e1", ChangeKind::Activated, 2),
            ],
        );
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        assert_eq!(counts.get(&ChangeKind::Activated).copied(), Some(1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn terminal_latest_counts_as_terminal() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(
            subject,
            t0,
            &[
                ("e1", ChangeKind::Activated, 0),
                ("e1", ChangeKind::Updated, 1),
            ],
        );
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        assert_eq!(counts.get(&ChangeKind::Updated).copied(), Some(1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn independent_entities_count_independently() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(
            subject,
            t0,
            &[
                ("e1", ChangeKind::Activated, 0),
                ("e2", ChangeKind::Deactivated, 0),
            ],
        );
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        assert_eq!(counts.get(&ChangeKind::Activated).copied(), Some(1));
        assert_eq!(counts.get(&ChangeKind::Deactivated).copied(), Some(1));
    }

    #[test]
    fn empty_window_is_an_error() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let result = ChangeSummarizer::standard().summarize(subject, t0, vec![]);
        assert_eq!(
            result,
            Err(ReduceError::NoChanges { subject, since: t0 })
        );
    }

    #[test]
    fn events_before_window_do_not_count() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        // Both events predate the window: equivalent to an empty batch.
        let events = batch(
            subject,
            t0,
            &[
                ("e1", ChangeKind::Updated, -10),
                ("e2", ChangeKind::Activated, -5),
            ],
        );
        let result = ChangeSummarizer::standard().summarize(subject, t0, events);
        assert!(matches!(result, Err(ReduceError::NoChanges { .. })));
    }

    #[test]
    fn window_lower_bound_is_inclusive() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(subject, t0, &[("e1", ChangeKind::Updated, 0)]);
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        assert_eq!(counts.get(&ChangeKind::Updated).copied(), Some(1));
    }

    #[test]
    fn keyless_events_are_excluded_from_counts() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(
            subject,
            t0,
            &[("", ChangeKind::Updated, 0), ("e1", ChangeKind::Updated, 1)],
        );
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        assert_eq!(counts.get(&ChangeKind::Updated).copied(), Some(1));
    }

    #[test]
    fn summary_is_invariant_under_input_permutation() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let specs: Vec<(&str, ChangeKind, i64)> = vec![
            ("e1", ChangeKind::Activated, 0),
            ("e1", ChangeKind::Deactivated, 3),
            ("e2", ChangeKind::Updated, 1),
            ("e3", ChangeKind::Activated, 2),
            ("", ChangeKind::Updated, 4),
        ];
        let summarizer = ChangeSummarizer::standard();
        let baseline = summarizer
            .summarize(subject, t0, batch(subject, t0, &specs))
            .unwrap();

        // Rotate the batch through every starting position. Timestamps are
        // distinct, so the tie-break never engages and every permutation
        // must agree.
        for rotation in 1..specs.len() {
            let mut rotated = specs.clone();
            rotated.rotate_left(rotation);
            let counts = summarizer
                .summarize(subject, t0, batch(subject, t0, &rotated))
                .unwrap();
            assert_eq!(counts, baseline);
        }
    }

    #[test]
    fn counts_sum_to_resolved_entities() {
        let subject = SubjectId::new();
        let t0 = Utc::now();
        let events = batch(
            subject,
            t0,
            &[
                ("e1", ChangeKind::Activated, 0),
                ("e1", ChangeKind::Deactivated, 1),
                ("e2", ChangeKind::Updated, 0),
                ("e3", ChangeKind::Deactivated, 0),
                ("e4", ChangeKind::Activated, 0),
                ("e4", ChangeKind::Updated, 1),
            ],
        );
        let counts = ChangeSummarizer::standard()
            .summarize(subject, t0, events)
            .unwrap();
        // e1 cancelled out; e2, e3, e4 resolved.
        let total: u64 = counts.values().copied().sum();
        assert_eq!(total, 3);
    }
}
