//! Counting resolved net effects by kind.

use std::collections::BTreeMap;

use changeflow_types::EntityKey;

/// Count `Some` resolutions by effect kind.
///
/// Entities whose resolution is `None` contributed no net change and are
/// excluded. Kinds with zero occurrences are absent from the result rather
/// than present with a zero count.
///
/// Invariant: the counts sum to the number of `Some` entries in the input.
pub fn count_by_kind<K: Copy + Ord>(
    resolutions: &BTreeMap<EntityKey, Option<K>>,
) -> BTreeMap<K, u64> {
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();

    for kind in resolutions.values().filter_map(Option::as_ref) {
        let count = counts.entry(*kind).or_insert(0);
        *count = count.saturating_add(1);
    }

    counts
}

#[cfg(test)]
mod tests {
    // Panicking on a malformed fixture is the correct behavior in test code.
    #![allow(clippy::unwrap_used)]

    use changeflow_types::ChangeKind;

    use super::*;

    fn resolutions(
        entries: &[(&str, Option<ChangeKind>)],
    ) -> BTreeMap<EntityKey, Option<ChangeKind>> {
        entries
            .iter()
            .map(|&(raw, kind)| (EntityKey::new(raw).unwrap(), kind))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_counts() {
        let counts = count_by_kind::<ChangeKind>(&BTreeMap::new());
        assert!(counts.is_empty());
    }

    #[test]
    fn none_resolutions_are_excluded() {
        let input = resolutions(&[("a", None), ("b", None)]);
        assert!(count_by_kind(&input).is_empty());
    }

    #[test]
    fn counts_group_by_kind() {
        let input = resolutions(&[
            ("a", Some(ChangeKind::Activated)),
            ("b", Some(ChangeKind::Activated)),
            ("c", Some(ChangeKind::Updated)),
            ("d", None),
        ]);
        let counts = count_by_kind(&input);
        assert_eq!(counts.get(&ChangeKind::Activated).copied(), Some(2));
        assert_eq!(counts.get(&ChangeKind::Updated).copied(), Some(1));
        assert_eq!(counts.get(&ChangeKind::Deactivated), None);
    }

    #[test]
    fn counts_sum_to_some_resolutions() {
        let input = resolutions(&[
            ("a", Some(ChangeKind::Activated)),
            ("b", Some(ChangeKind::Deactivated)),
            ("c", None),
            ("d", Some(ChangeKind::Updated)),
        ]);
        let total: u64 = count_by_kind(&input).values().copied().sum();
        let expected = u64::try_from(input.values().filter(|r| r.is_some()).count()).unwrap();
        assert_eq!(total, expected);
    }
}
