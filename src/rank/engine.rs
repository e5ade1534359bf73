//! Engine operations over one ranked collection.

use std::collections::HashSet;

use log::debug;

use super::{Direction, Ranked};
use crate::store::{Record, RecordKey, RecordStore, StoreError};

/// Fetch every row of a collection, sorted ascending by rank.
///
/// A missing rank deserializes as 0 and sorts first; such rows are legacy
/// state awaiting repair, not a supported steady state.
pub fn load<S: RecordStore, R: Record + Ranked>(store: &S) -> Result<Vec<R>, StoreError> {
    let mut rows: Vec<R> = store.get_all()?;
    sort_by_rank(&mut rows);
    Ok(rows)
}

/// Sort a list ascending by persisted rank.
pub fn sort_by_rank<R: Ranked>(rows: &mut [R]) {
    rows.sort_by_key(|row| row.rank());
}

/// Swap the entries at `index` and its neighbour in `direction`, reassign
/// `rank = position + 1` to exactly those two, and persist exactly those
/// two rows in one transaction.
///
/// Requires a dense pre-state; the swap exchanges two adjacent rank values
/// and cannot repair gaps. Out-of-bounds moves are a silent no-op (returns
/// false), a boundary policy rather than an error.
pub fn move_adjacent<S, R>(
    store: &S,
    list: &mut [R],
    index: usize,
    direction: Direction,
) -> Result<bool, StoreError>
where
    S: RecordStore,
    R: Record + Ranked,
{
    let Some(neighbour) = direction.neighbour(index, list.len()) else {
        return Ok(false);
    };

    list.swap(index, neighbour);
    list[index].set_rank(index as u32 + 1);
    list[neighbour].set_rank(neighbour as u32 + 1);

    let mut tx = store.transaction();
    tx.put(&list[index])?;
    tx.put(&list[neighbour])?;
    tx.commit()?;

    debug!(
        "{}: swapped positions {} and {} (2 rows written)",
        R::COLLECTION,
        index,
        neighbour
    );
    Ok(true)
}

/// Save a row at an explicit 1-based rank, or append/keep-current-rank
/// when no valid rank is requested.
///
/// With `target_rank` absent or below 1 this is the cheap path: new rows
/// are appended with `rank = N + 1`, edited rows keep the rank they carry,
/// and exactly one row is written. With a target rank the list is
/// re-sorted, the row's stale copy removed (edit case), the target index
/// clamped into bounds, and every row's rank rewritten to its position + 1
/// in one transaction — after which the ranks are exactly 1..N with the
/// row at the clamped position.
pub fn insert_at_rank<S, R>(
    store: &S,
    list: &mut Vec<R>,
    mut item: R,
    target_rank: Option<u32>,
    is_new: bool,
) -> Result<(), StoreError>
where
    S: RecordStore,
    R: Record + Ranked,
{
    sort_by_rank(list);

    let Some(target_rank) = target_rank.filter(|rank| *rank >= 1) else {
        if is_new {
            item.set_rank(list.len() as u32 + 1);
        }
        let mut tx = store.transaction();
        tx.put(&item)?;
        tx.commit()?;

        replace_or_push(list, item);
        debug!("{}: saved without repositioning (1 row written)", R::COLLECTION);
        return Ok(());
    };

    if !is_new {
        let key = item.key();
        list.retain(|row| row.key() != key);
    }

    let target_index = (target_rank as usize - 1).min(list.len());
    list.insert(target_index, item);

    let mut tx = store.transaction();
    for (position, row) in list.iter_mut().enumerate() {
        row.set_rank(position as u32 + 1);
        tx.put(row)?;
    }
    let written = tx.len();
    tx.commit()?;

    debug!(
        "{}: resequenced around rank {} ({} rows written)",
        R::COLLECTION,
        target_rank,
        written
    );
    Ok(())
}

/// Move the entry at `from` so it ends up at index `to`, renumbering and
/// persisting only the rows between the two positions in one transaction.
///
/// This is the drag-and-drop path: cheaper than a full resequence, and
/// like [`move_adjacent`] it assumes a dense pre-state. Out-of-bounds
/// indices and `from == to` are silent no-ops.
pub fn move_to<S, R>(
    store: &S,
    list: &mut Vec<R>,
    from: usize,
    to: usize,
) -> Result<bool, StoreError>
where
    S: RecordStore,
    R: Record + Ranked,
{
    if from >= list.len() || to >= list.len() || from == to {
        return Ok(false);
    }

    let item = list.remove(from);
    list.insert(to, item);

    let (start, end) = if from < to { (from, to) } else { (to, from) };

    let mut tx = store.transaction();
    for position in start..=end {
        list[position].set_rank(position as u32 + 1);
        tx.put(&list[position])?;
    }
    tx.commit()?;

    debug!(
        "{}: moved {} -> {} ({} rows written)",
        R::COLLECTION,
        from,
        to,
        end - start + 1
    );
    Ok(true)
}

/// Delete a set of rows in one transaction.
///
/// Survivors are not renumbered: the persisted sequence keeps gaps where
/// the deleted ranks were, until the next [`insert_at_rank`] resequences
/// the collection. Display numbering is positional, so the visible ranking
/// stays dense regardless. Returns the number of rows removed from the
/// in-memory list.
pub fn delete_many<S, R>(
    store: &S,
    list: &mut Vec<R>,
    keys: &HashSet<RecordKey>,
) -> Result<usize, StoreError>
where
    S: RecordStore,
    R: Record + Ranked,
{
    if keys.is_empty() {
        return Ok(0);
    }

    let mut tx = store.transaction();
    for key in keys {
        tx.delete::<R>(key);
    }
    tx.commit()?;

    let before = list.len();
    list.retain(|row| !keys.contains(&row.key()));
    let removed = before - list.len();

    debug!("{}: deleted {} rows (ranks left sparse)", R::COLLECTION, removed);
    Ok(removed)
}

/// Delete a single row; same gap-tolerant behavior as [`delete_many`].
pub fn delete_one<S, R>(store: &S, list: &mut Vec<R>, key: &RecordKey) -> Result<bool, StoreError>
where
    S: RecordStore,
    R: Record + Ranked,
{
    let mut keys = HashSet::new();
    keys.insert(key.clone());
    Ok(delete_many(store, list, &keys)? > 0)
}

fn replace_or_push<R: Record>(list: &mut Vec<R>, item: R) {
    let key = item.key();
    match list.iter().position(|row| row.key() == key) {
        Some(position) => list[position] = item,
        None => list.push(item),
    }
}
