//! Property-based tests for feed reconciliation and pagination.
//!
//! Tests validate:
//! 1. Appending never produces two sections with the same identity
//! 2. Initial load preserves section and event order
//! 3. Pages merge into existing sections and append new ones at the end
//! 4. The pagination trigger fires only for the last item of the last section

use livingdoc::model::{
    ContinuationToken, EventId, LivingDocViewModel, SectionHeader, SectionId, SmallEvent,
    TypedEvent,
};
use livingdoc::state::{
    FeedStateStore, ItemPath, LivingDocDelegate, PaginationOutcome, PaginationTrigger,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

// ===== Strategies =====

fn event(rev: u64) -> TypedEvent {
    TypedEvent::Small(SmallEvent::new(vec![rev]).unwrap())
}

fn section(id: &str, revs: &[u64]) -> SectionHeader {
    SectionHeader::new(
        SectionId::new(id).unwrap(),
        id,
        revs.iter().copied().map(event).collect(),
    )
}

/// A page of sections drawn from a small identity pool so pages overlap.
fn page_strategy() -> impl Strategy<Value = Vec<SectionHeader>> {
    prop::collection::vec(
        (0u8..6, prop::collection::vec(0u64..30, 0..6)),
        0..5,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(day, revs)| section(&format!("day-{day}"), &revs))
            .collect()
    })
}

fn section_keys(store: &FeedStateStore) -> Vec<String> {
    store
        .snapshot()
        .section_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

// ===== Property 1: Identity is never duplicated =====

proptest! {
    #[test]
    fn appends_never_duplicate_identities(pages in prop::collection::vec(page_strategy(), 1..6)) {
        let mut store = FeedStateStore::new();
        for page in pages {
            store.append_sections(page);
        }

        let snapshot = store.snapshot();
        let ids = snapshot.section_ids();
        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());

        for section in 0..snapshot.number_of_sections() {
            let items = snapshot.item_ids(section);
            let unique: HashSet<&EventId> = items.iter().collect();
            prop_assert_eq!(unique.len(), items.len());
        }
    }

    #[test]
    fn appends_keep_earlier_sections_in_place(
        first in page_strategy(),
        rest in prop::collection::vec(page_strategy(), 0..4),
    ) {
        let mut store = FeedStateStore::new();
        store.add_initial_sections(first);
        let initial = section_keys(&store);

        for page in rest {
            store.append_sections(page);
            let keys = section_keys(&store);
            prop_assert_eq!(&keys[..initial.len()], &initial[..]);
        }
    }
}

// ===== Property 2: Order preservation =====

proptest! {
    #[test]
    fn initial_load_preserves_order(
        days in prop::collection::hash_set(0u16..500, 0..12)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
        revs in prop::collection::hash_set(0u64..1000, 0..8)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
    ) {
        let sections: Vec<_> = days
            .iter()
            .map(|day| section(&format!("day-{day}"), &revs))
            .collect();
        let expected: Vec<String> = days.iter().map(|day| format!("day-{day}")).collect();
        let expected_items: Vec<EventId> = revs.iter().copied().map(event).map(|e| e.id()).collect();

        let mut store = FeedStateStore::new();
        store.add_initial_sections(sections);

        prop_assert_eq!(section_keys(&store), expected);
        let snapshot = store.snapshot();
        for index in 0..snapshot.number_of_sections() {
            prop_assert_eq!(snapshot.item_ids(index), expected_items.clone());
        }
    }
}

// ===== Property 3: Incremental merge =====

proptest! {
    #[test]
    fn matching_identity_merges_events(
        existing in prop::collection::hash_set(0u64..100, 1..6),
        incoming in prop::collection::hash_set(100u64..200, 1..6),
    ) {
        let existing: Vec<u64> = existing.into_iter().collect();
        let incoming: Vec<u64> = incoming.into_iter().collect();

        let mut store = FeedStateStore::new();
        store.add_initial_sections(vec![section("today", &existing)]);
        let diff = store.append_sections(vec![section("today", &incoming)]);

        let snapshot = store.snapshot();
        prop_assert_eq!(snapshot.number_of_sections(), 1);
        prop_assert_eq!(snapshot.number_of_items(0), existing.len() + incoming.len());
        prop_assert_eq!(diff.inserted_items, incoming.len());
        prop_assert!(diff.is_insert_only());

        let expected: Vec<EventId> = existing
            .iter()
            .chain(&incoming)
            .copied()
            .map(event)
            .map(|e| e.id())
            .collect();
        prop_assert_eq!(snapshot.item_ids(0), expected);
    }

    #[test]
    fn new_identity_appends_section_at_end(
        existing in prop::collection::vec(0u64..50, 0..5),
        incoming in prop::collection::vec(50u64..100, 0..5),
    ) {
        let mut store = FeedStateStore::new();
        store.add_initial_sections(vec![section("a", &existing)]);
        store.append_sections(vec![section("b", &incoming)]);

        prop_assert_eq!(section_keys(&store), vec!["a".to_string(), "b".to_string()]);
    }
}

#[test]
fn empty_append_on_empty_store_is_safe() {
    let mut store = FeedStateStore::new();
    let diff = store.append_sections(Vec::new());

    assert!(store.snapshot().is_empty());
    assert!(diff.is_empty());
}

// ===== Property 4: Pagination trigger =====

#[derive(Default)]
struct Counter {
    requests: Mutex<Vec<ContinuationToken>>,
}

impl LivingDocDelegate for Counter {
    fn fetch_next_page(&self, next_rv_start_id: ContinuationToken) {
        self.requests.lock().unwrap().push(next_rv_start_id);
    }

    fn view_model(&self) -> Option<LivingDocViewModel> {
        None
    }
}

proptest! {
    #[test]
    fn trigger_fires_only_for_last_item_with_live_token(
        sizes in prop::collection::vec(1usize..5, 1..5),
        section_pick in any::<prop::sample::Index>(),
        item_pick in any::<prop::sample::Index>(),
        token in prop_oneof![Just(0u64), 1u64..10_000],
    ) {
        let mut rev = 0;
        let sections: Vec<_> = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let revs: Vec<u64> = (0..size).map(|_| { rev += 1; rev }).collect();
                section(&format!("s{i}"), &revs)
            })
            .collect();
        let mut store = FeedStateStore::new();
        store.add_initial_sections(sections);
        let snapshot = store.snapshot();

        let section = section_pick.index(sizes.len());
        let item = item_pick.index(sizes[section]);
        let path = ItemPath::new(section, item);
        let is_last = section == sizes.len() - 1 && item == sizes[section] - 1;

        let counter = Arc::new(Counter::default());
        let delegate: Arc<dyn LivingDocDelegate> = counter.clone();
        let trigger = PaginationTrigger::new(Arc::downgrade(&delegate));

        let outcome = trigger.item_will_display(path, &snapshot, ContinuationToken::new(token));
        let requests = counter.requests.lock().unwrap().clone();

        if is_last && token != 0 {
            prop_assert_eq!(outcome, PaginationOutcome::Fired(ContinuationToken::new(token)));
            prop_assert_eq!(requests, vec![ContinuationToken::new(token)]);
        } else {
            prop_assert!(requests.is_empty());
            let expected = if is_last { PaginationOutcome::Exhausted } else { PaginationOutcome::NotLastItem };
            prop_assert_eq!(outcome, expected);
        }
    }
}
