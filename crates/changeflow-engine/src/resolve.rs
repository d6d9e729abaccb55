//! Reducing one entity's event group to a single net effect.

use changeflow_types::{ChangeEvent, KindRoles};

/// Compute the net effect of one entity's events.
///
/// Returns `None` when the entity's changes are indistinguishable from no
/// change; such entities are excluded from the aggregate.
///
/// The latest event is the one with the maximum `occurred_at`. **Tie-break:
/// when several events share the maximum timestamp, the first of them in
/// input order wins.** The store feeds groups in `(occurred_at, id)` order
/// with time-ordered ids, so "first in input order" is "first recorded".
///
/// Reduction rules, in order:
///
/// 1. Latest event carries `roles.terminal` → that kind, unconditionally.
///    Nothing older can matter once the entity was last rewritten in place.
/// 2. Even number of toggle-pair events in the group → `None`. The flips
///    cancelled; the entity is back in its starting state.
/// 3. Odd number → the latest event's kind. The entity is left flipped in
///    whatever direction the most recent change recorded.
///
/// An empty group yields `None`; the grouper never produces one, but the
/// function stays total.
pub fn resolve_net_effect<K: Copy + PartialEq>(
    group: &[ChangeEvent<K>],
    roles: &KindRoles<K>,
) -> Option<K> {
    // Strict comparison keeps the first-seen event on ties.
    let latest = group.iter().reduce(|best, event| {
        if event.occurred_at > best.occurred_at {
            event
        } else {
            best
        }
    })?;

    if roles.is_terminal(&latest.kind) {
        return Some(latest.kind);
    }

    let toggles = group
        .iter()
        .filter(|event| roles.is_toggle(&event.kind))
        .count();

    if toggles.is_multiple_of(2) {
        None
    } else {
        Some(latest.kind)
    }
}
