//! Reconciliation between two ordered keyed sequences.
//!
//! Produces batch-update style change lists that any rendering layer can animate:
//! removals index into the old sequence, insertions into the new sequence, and moves
//! map an old index to a new index. Elements not mentioned keep their identity and
//! relative order.

use super::snapshot::Snapshot;
use crate::model::SectionId;
use std::collections::HashMap;
use std::hash::Hash;

/// One change between an old and a new keyed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyedChange {
    /// An element of the old sequence is gone.
    Remove {
        /// Index in the old sequence.
        from: usize,
    },
    /// A new element appears.
    Insert {
        /// Index in the new sequence.
        to: usize,
    },
    /// A surviving element changes position.
    Move {
        /// Index in the old sequence.
        from: usize,
        /// Index in the new sequence.
        to: usize,
    },
}

/// Compute the changes turning `old` into `new`.
///
/// Keys must be unique within each sequence. Output order: removals by descending
/// old index, then insertions by ascending new index, then moves by ascending new
/// index. Elements on the longest increasing run of old positions stay put; every
/// other surviving element is reported as a move.
pub fn diff_keyed<K: Eq + Hash>(old: &[K], new: &[K]) -> Vec<KeyedChange> {
    let old_positions: HashMap<&K, usize> = old.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let new_positions: HashMap<&K, usize> = new.iter().enumerate().map(|(i, k)| (k, i)).collect();
    debug_assert_eq!(old_positions.len(), old.len(), "duplicate keys in old sequence");
    debug_assert_eq!(new_positions.len(), new.len(), "duplicate keys in new sequence");

    let mut changes = Vec::new();

    for (from, key) in old.iter().enumerate().rev() {
        if !new_positions.contains_key(key) {
            changes.push(KeyedChange::Remove { from });
        }
    }

    // (new index, old index) for survivors, in new order
    let mut survivors = Vec::new();
    for (to, key) in new.iter().enumerate() {
        match old_positions.get(key) {
            Some(&from) => survivors.push((to, from)),
            None => changes.push(KeyedChange::Insert { to }),
        }
    }

    let old_order: Vec<usize> = survivors.iter().map(|&(_, from)| from).collect();
    let mut stable = vec![false; survivors.len()];
    for i in longest_increasing_subsequence(&old_order) {
        stable[i] = true;
    }
    for (i, &(to, from)) in survivors.iter().enumerate() {
        if !stable[i] {
            changes.push(KeyedChange::Move { from, to });
        }
    }

    changes
}

/// Indices into `values` forming one longest strictly increasing subsequence.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];

    for (i, &value) in values.iter().enumerate() {
        let pos = tails.partition_point(|&t| values[t] < value);
        if pos > 0 {
            previous[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        result.push(i);
        cursor = previous[i];
    }
    result.reverse();
    result
}

/// Item changes inside one section present in both snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItemChanges {
    /// Identity of the section.
    pub section: SectionId,
    /// Position of the section in the old snapshot.
    pub old_index: usize,
    /// Position of the section in the new snapshot.
    pub new_index: usize,
    /// Item changes inside the section.
    pub changes: Vec<KeyedChange>,
}

/// Difference between two snapshots.
///
/// Items of inserted or removed sections are implied by the section change and are not
/// listed individually.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotDiff {
    /// Section-level changes.
    pub sections: Vec<KeyedChange>,
    /// Item-level changes, one entry per section with any.
    pub items: Vec<SectionItemChanges>,
    /// Items present in the new snapshot but not the old one, including those of
    /// inserted sections.
    pub inserted_items: usize,
}

impl SnapshotDiff {
    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.is_empty()
    }

    /// True when the diff only adds sections or items.
    pub fn is_insert_only(&self) -> bool {
        let only_inserts =
            |changes: &[KeyedChange]| changes.iter().all(|c| matches!(c, KeyedChange::Insert { .. }));
        only_inserts(&self.sections) && self.items.iter().all(|s| only_inserts(&s.changes))
    }

    /// Number of sections added.
    pub fn inserted_sections(&self) -> usize {
        self.sections
            .iter()
            .filter(|c| matches!(c, KeyedChange::Insert { .. }))
            .count()
    }
}

/// Diff two snapshots at section level, then item level for surviving sections.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> SnapshotDiff {
    let old_ids = old.section_ids();
    let new_ids = new.section_ids();
    let sections = diff_keyed(&old_ids, &new_ids);

    let old_positions: HashMap<&SectionId, usize> =
        old_ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

    let mut items = Vec::new();
    let mut inserted_items = 0;
    for (new_index, id) in new_ids.iter().enumerate() {
        match old_positions.get(id) {
            Some(&old_index) => {
                let changes = diff_keyed(&old.item_ids(old_index), &new.item_ids(new_index));
                inserted_items += changes
                    .iter()
                    .filter(|c| matches!(c, KeyedChange::Insert { .. }))
                    .count();
                if !changes.is_empty() {
                    items.push(SectionItemChanges {
                        section: id.clone(),
                        old_index,
                        new_index,
                        changes,
                    });
                }
            }
            None => inserted_items += new.number_of_items(new_index),
        }
    }

    SnapshotDiff {
        sections,
        items,
        inserted_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SectionHeader, SmallEvent, TypedEvent};
    use crate::state::snapshot::SnapshotBuilder;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn snapshot(layout: &[(&str, &[u64])]) -> Snapshot {
        let mut builder = SnapshotBuilder::new();
        for (id, revs) in layout {
            let events: Vec<_> = revs
                .iter()
                .map(|r| TypedEvent::Small(SmallEvent::new(vec![*r]).unwrap()))
                .collect();
            let section = SectionHeader::new(SectionId::new(*id).unwrap(), *id, events);
            builder.append_section(&section);
            builder.append_items(&section.events, &section.id);
        }
        builder.build()
    }

    /// Rebuild `new` from `old` and the change list, using batch-update semantics.
    fn apply(old: &[u32], new_len: usize, changes: &[KeyedChange], new: &[u32]) -> Vec<Option<u32>> {
        let removed: HashSet<usize> = changes
            .iter()
            .filter_map(|c| match c {
                KeyedChange::Remove { from } => Some(*from),
                _ => None,
            })
            .collect();
        let moved_from: HashSet<usize> = changes
            .iter()
            .filter_map(|c| match c {
                KeyedChange::Move { from, .. } => Some(*from),
                _ => None,
            })
            .collect();

        let mut result = vec![None; new_len];
        for change in changes {
            match *change {
                KeyedChange::Insert { to } => result[to] = Some(new[to]),
                KeyedChange::Move { from, to } => result[to] = Some(old[from]),
                KeyedChange::Remove { .. } => {}
            }
        }
        let mut stable = old
            .iter()
            .enumerate()
            .filter(|(i, _)| !removed.contains(i) && !moved_from.contains(i))
            .map(|(_, k)| *k);
        for slot in result.iter_mut() {
            if slot.is_none() {
                *slot = stable.next();
            }
        }
        result
    }

    #[test]
    fn identical_sequences_have_no_changes() {
        assert!(diff_keyed(&[1, 2, 3], &[1, 2, 3]).is_empty());
    }

    #[test]
    fn append_only_yields_inserts() {
        assert_eq!(
            diff_keyed(&["a"], &["a", "b", "c"]),
            vec![KeyedChange::Insert { to: 1 }, KeyedChange::Insert { to: 2 }]
        );
    }

    #[test]
    fn removal_and_insert_snapshot() {
        let changes = diff_keyed(&["a", "b", "c"], &["a", "c", "d"]);
        insta::assert_debug_snapshot!(changes, @r###"
        [
            Remove {
                from: 1,
            },
            Insert {
                to: 2,
            },
        ]
        "###);
    }

    #[test]
    fn swap_reports_single_move() {
        let changes = diff_keyed(&["a", "b"], &["b", "a"]);
        assert_eq!(changes.len(), 1);
        assert!(matches!(changes[0], KeyedChange::Move { .. }));
    }

    #[test]
    fn lis_of_sorted_input_is_everything() {
        assert_eq!(longest_increasing_subsequence(&[0, 1, 2, 3]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn lis_picks_longest_run() {
        let values = [3, 0, 1, 4, 2];
        let lis = longest_increasing_subsequence(&values);
        assert_eq!(lis.len(), 3);
        assert!(lis.windows(2).all(|w| values[w[0]] < values[w[1]]));
    }

    #[test]
    fn lis_of_empty_is_empty() {
        assert!(longest_increasing_subsequence(&[]).is_empty());
    }

    #[test]
    fn snapshot_diff_appended_section_is_insert_only() {
        let old = snapshot(&[("a", &[1, 2])]);
        let new = snapshot(&[("a", &[1, 2]), ("b", &[3, 4])]);
        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.sections, vec![KeyedChange::Insert { to: 1 }]);
        assert!(diff.items.is_empty());
        assert!(diff.is_insert_only());
        assert_eq!(diff.inserted_items, 2);
        assert_eq!(diff.inserted_sections(), 1);
    }

    #[test]
    fn snapshot_diff_reports_items_inside_existing_section() {
        let old = snapshot(&[("a", &[1, 2])]);
        let new = snapshot(&[("a", &[1, 2, 3])]);
        let diff = diff_snapshots(&old, &new);
        assert!(diff.sections.is_empty());
        assert_eq!(diff.items.len(), 1);
        assert_eq!(diff.items[0].section.as_str(), "a");
        assert_eq!(diff.items[0].changes, vec![KeyedChange::Insert { to: 2 }]);
        assert_eq!(diff.inserted_items, 1);
    }

    #[test]
    fn snapshot_diff_of_removal_is_not_insert_only() {
        let old = snapshot(&[("a", &[1]), ("b", &[2])]);
        let new = snapshot(&[("b", &[2])]);
        let diff = diff_snapshots(&old, &new);
        assert!(!diff.is_insert_only());
        assert_eq!(diff.sections, vec![KeyedChange::Remove { from: 0 }]);
    }

    #[test]
    fn snapshot_diff_of_equal_snapshots_is_empty() {
        let old = snapshot(&[("a", &[1])]);
        let diff = diff_snapshots(&old, &old.clone());
        assert!(diff.is_empty());
        assert_eq!(diff.inserted_items, 0);
    }

    fn unique_keys() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::hash_set(0u32..40, 0..20)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn applying_changes_reconstructs_new(old in unique_keys(), new in unique_keys()) {
            let changes = diff_keyed(&old, &new);
            let rebuilt = apply(&old, new.len(), &changes, &new);
            let expected: Vec<Option<u32>> = new.iter().copied().map(Some).collect();
            prop_assert_eq!(rebuilt, expected);
        }

        #[test]
        fn change_counts_match_set_difference(old in unique_keys(), new in unique_keys()) {
            let changes = diff_keyed(&old, &new);
            let old_set: HashSet<_> = old.iter().collect();
            let new_set: HashSet<_> = new.iter().collect();
            let inserts = changes.iter().filter(|c| matches!(c, KeyedChange::Insert { .. })).count();
            let removes = changes.iter().filter(|c| matches!(c, KeyedChange::Remove { .. })).count();
            prop_assert_eq!(inserts, new_set.difference(&old_set).count());
            prop_assert_eq!(removes, old_set.difference(&new_set).count());
        }
    }
}
