//! Integration tests for the rank engine's three write paths.

mod fixtures;

use std::collections::HashSet;

use coaster_top::rank::{delete_many, delete_one, insert_at_rank, load, move_adjacent, move_to};
use coaster_top::{Coaster, Direction, RecordKey, RecordStore};
use fixtures::*;

#[test]
fn insert_at_rank_keeps_ranks_dense_for_any_target() {
    for target in [None, Some(0), Some(1), Some(3), Some(6), Some(99)] {
        let store = CountingStore::new();
        let mut list = seeded_list(&store, 5);

        insert_at_rank(&store, &mut list, coaster(6, "New", 0), target, true).unwrap();

        assert_eq!(ranks(&list), vec![1, 2, 3, 4, 5, 6], "target {:?}", target);
        assert_eq!(
            persisted_ranks(&store),
            vec![1, 2, 3, 4, 5, 6],
            "target {:?}",
            target
        );
    }
}

#[test]
fn append_without_target_writes_one_row() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 3);

    insert_at_rank(&store, &mut list, coaster(4, "New", 0), None, true).unwrap();

    assert_eq!(store.batch_sizes(), vec![1]);
    assert_eq!(list[3].id, 4);
    assert_eq!(list[3].rank, 4);
}

#[test]
fn edit_without_target_keeps_current_rank() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 3);

    let mut edited = list[1].clone();
    edited.name = "Renamed".to_string();
    insert_at_rank(&store, &mut list, edited, None, false).unwrap();

    assert_eq!(store.batch_sizes(), vec![1]);
    assert_eq!(list[1].name, "Renamed");
    assert_eq!(ranks(&list), vec![1, 2, 3]);
    let persisted: Coaster = store.get(&RecordKey::Id(2)).unwrap().unwrap();
    assert_eq!(persisted.name, "Renamed");
    assert_eq!(persisted.rank, 2);
}

#[test]
fn target_below_one_falls_back_to_keep_current_rank() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 4);

    let edited = list[2].clone();
    insert_at_rank(&store, &mut list, edited, Some(0), false).unwrap();

    assert_eq!(store.batch_sizes(), vec![1]);
    assert_eq!(ranks(&list), vec![1, 2, 3, 4]);
}

#[test]
fn target_past_the_end_clamps_to_last() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 4);

    insert_at_rank(&store, &mut list, coaster(5, "New", 0), Some(99), true).unwrap();

    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);
    assert_eq!(ranks(&list), vec![1, 2, 3, 4, 5]);
    assert_eq!(persisted_ranks(&store), vec![1, 2, 3, 4, 5]);
}

#[test]
fn repositioning_rank_five_to_rank_two() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 5);

    let moved = list[4].clone();
    insert_at_rank(&store, &mut list, moved, Some(2), false).unwrap();

    assert_eq!(ids(&list), vec![1, 5, 2, 3, 4]);
    assert_eq!(ranks(&list), vec![1, 2, 3, 4, 5]);
    assert_eq!(persisted_ranks(&store), vec![1, 2, 3, 4, 5]);
}

#[test]
fn swap_adjacent_writes_exactly_two_rows_and_is_invertible() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 5);
    let original_ids = ids(&list);

    assert!(move_adjacent(&store, &mut list, 2, Direction::Down).unwrap());
    assert_eq!(ids(&list), vec![1, 2, 4, 3, 5]);

    assert!(move_adjacent(&store, &mut list, 3, Direction::Up).unwrap());
    assert_eq!(ids(&list), original_ids);
    assert_eq!(ranks(&list), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.batch_sizes(), vec![2, 2]);
    assert_eq!(persisted_ranks(&store), vec![1, 2, 3, 4, 5]);
}

#[test]
fn swap_past_the_list_ends_is_a_no_op() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 3);
    let before = list.clone();

    assert!(!move_adjacent(&store, &mut list, 0, Direction::Up).unwrap());
    assert!(!move_adjacent(&store, &mut list, 2, Direction::Down).unwrap());

    assert_eq!(list, before);
    assert!(store.batch_sizes().is_empty());
}

#[test]
fn move_to_renumbers_only_the_spanned_range() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 5);

    assert!(move_to(&store, &mut list, 0, 3).unwrap());

    assert_eq!(ids(&list), vec![2, 3, 4, 1, 5]);
    assert_eq!(ranks(&list), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.batch_sizes(), vec![4]);
}

#[test]
fn move_to_same_or_out_of_bounds_is_a_no_op() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 3);

    assert!(!move_to(&store, &mut list, 1, 1).unwrap());
    assert!(!move_to(&store, &mut list, 5, 0).unwrap());
    assert!(!move_to(&store, &mut list, 0, 5).unwrap());
    assert!(store.batch_sizes().is_empty());
}

#[test]
fn bulk_delete_leaves_survivor_ranks_sparse() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 5);

    let keys: HashSet<RecordKey> = [RecordKey::Id(2), RecordKey::Id(4)].into_iter().collect();
    assert_eq!(delete_many(&store, &mut list, &keys).unwrap(), 2);

    assert_eq!(ids(&list), vec![1, 3, 5]);
    // Gap-tolerant: survivors keep their old ranks until the next
    // insert-at-rank resequences the collection.
    assert_eq!(persisted_ranks(&store), vec![1, 3, 5]);

    insert_at_rank(&store, &mut list, coaster(6, "Healer", 0), Some(1), true).unwrap();
    assert_eq!(persisted_ranks(&store), vec![1, 2, 3, 4]);
}

#[test]
fn single_delete_mirrors_bulk_delete() {
    let store = CountingStore::new();
    let mut list = seeded_list(&store, 3);

    assert!(delete_one(&store, &mut list, &RecordKey::Id(2)).unwrap());
    assert!(!delete_one(&store, &mut list, &RecordKey::Id(99)).unwrap());

    assert_eq!(ids(&list), vec![1, 3]);
    assert_eq!(persisted_ranks(&store), vec![1, 3]);
}

#[test]
fn load_sorts_by_rank_with_missing_ranks_first() {
    let store = CountingStore::new();
    store.put(&coaster(1, "Ranked", 2)).unwrap();
    store.put(&coaster(2, "Legacy", 0)).unwrap();
    store.put(&coaster(3, "Top", 1)).unwrap();

    let list: Vec<Coaster> = load(&store).unwrap();
    assert_eq!(ids(&list), vec![2, 3, 1]);
}
