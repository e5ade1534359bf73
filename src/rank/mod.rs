//! Rank - The ranked-list reordering engine.
//!
//! Maintains a dense 1..N rank sequence per collection under three write
//! paths with different cost/consistency trade-offs:
//!
//! - [`move_adjacent`]: swap two neighbours, write exactly 2 rows;
//! - [`insert_at_rank`]: place a row at an explicit rank, rewrite the
//!   whole collection in one transaction;
//! - [`delete_many`]/[`delete_one`]: remove rows without renumbering
//!   survivors (the persisted sequence may keep gaps until the next
//!   insert-at-rank heals it; display numbering is positional and stays
//!   dense regardless).
//!
//! The engine is state-free: every operation takes the in-memory list and
//! the store, mutates the list in place, and persists the touched rows in
//! one transaction. Callers own the lists and reload them from the store
//! after each mutation.

mod engine;

/// Rows that carry a persisted 1-based position.
pub trait Ranked {
    fn rank(&self) -> u32;
    fn set_rank(&mut self, rank: u32);

    /// Reserved rows keep their sentinel rank and must not be handed to
    /// the engine; callers filter them out of working lists.
    fn is_reserved(&self) -> bool {
        false
    }
}

/// Direction of an adjacent swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Neighbour index for a swap, or None when the move would leave the
    /// list bounds.
    pub(crate) fn neighbour(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Up if index > 0 && index < len => Some(index - 1),
            Direction::Down if index + 1 < len => Some(index + 1),
            _ => None,
        }
    }
}

pub use engine::{
    delete_many, delete_one, insert_at_rank, load, move_adjacent, move_to, sort_by_rank,
};
