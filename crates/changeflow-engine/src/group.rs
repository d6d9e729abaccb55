//! Partitioning a raw event batch into per-entity groups.

use std::collections::BTreeMap;

use changeflow_types::{ChangeEvent, EntityKey};

/// Partition a batch of events by entity key.
///
/// Events whose `entity_key` is absent are dropped: a change that cannot be
/// attributed to an entity cannot contribute to any entity's net effect.
/// Exclusion is silent by contract; the façade reports the dropped count at
/// debug level.
///
/// Input order is preserved within each bucket. The resolver's tie-break
/// for equal timestamps depends on this.
pub fn group_by_entity<K>(
    events: Vec<ChangeEvent<K>>,
) -> BTreeMap<EntityKey, Vec<ChangeEvent<K>>> {
    let mut groups: BTreeMap<EntityKey, Vec<ChangeEvent<K>>> = BTreeMap::new();

    for event in events {
        let Some(key) = event.entity_key.clone() else {
            continue;
        };
        groups.entry(key).or_default().push(event);
    }

    groups
}
