//! Move Operations
//!
//! Relative moves within one collection. Each move works on a snapshot and
//! returns only the items whose `sort_index` changed; the caller merges
//! them back. Collections with duplicate indices are repaired before the
//! move is applied, and the repaired items are part of the result.

use log::debug;

use super::sort_index::{changed_items, check_uniqueness, repair, sorted_list};
use crate::domain::{DomainError, DomainResult, Sortable};

/// Result of a move
#[derive(Debug, Clone, PartialEq)]
pub enum Reorder<T> {
    /// Nothing to do, e.g. moving the first item up
    Unchanged,
    /// Items with their new `sort_index`
    Changed(Vec<T>),
}

impl<T: Sortable> Reorder<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Reorder::Unchanged)
    }

    pub fn changed(&self) -> &[T] {
        match self {
            Reorder::Unchanged => &[],
            Reorder::Changed(items) => items,
        }
    }

    pub fn into_changed(self) -> Vec<T> {
        match self {
            Reorder::Unchanged => Vec::new(),
            Reorder::Changed(items) => items,
        }
    }

    /// Copy the new indices onto the matching members of `collection`
    pub fn apply_to(&self, collection: &mut [T]) -> DomainResult<()> {
        merge_sort_indices(collection, self.changed())
    }
}

/// Copy `sort_index` from each change onto the member with the same ID
pub fn merge_sort_indices<T: Sortable>(collection: &mut [T], changes: &[T]) -> DomainResult<()> {
    for change in changes {
        let item = collection
            .iter_mut()
            .find(|item| item.id() == change.id())
            .ok_or_else(|| DomainError::NotFound(format!("{:?} is not in the collection", change.id())))?;
        item.set_sort_index(change.sort_index());
    }
    Ok(())
}

fn locate<T: Sortable>(sorted: &[T], id: T::Id) -> DomainResult<usize> {
    sorted
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| DomainError::NotFound(format!("{:?} is not in the collection", id)))
}

/// Sorted snapshot with unique indices
fn consistent<T: Sortable>(collection: &[T]) -> Vec<T> {
    if check_uniqueness(collection) {
        sorted_list(collection)
    } else {
        debug!("Sort indices not unique, repairing before move");
        repair(collection)
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

fn swap_with_neighbour<T: Sortable>(
    collection: &[T],
    id: T::Id,
    direction: Direction,
) -> DomainResult<Reorder<T>> {
    let sorted = sorted_list(collection);
    let pos = locate(&sorted, id)?;
    let neighbour = match direction {
        Direction::Up if pos > 0 => pos - 1,
        Direction::Down if pos + 1 < sorted.len() => pos + 1,
        _ => return Ok(Reorder::Unchanged),
    };

    // Repair keeps the relative order, so the positions stay valid
    let mut working = consistent(collection);
    let a = working[pos].sort_index();
    let b = working[neighbour].sort_index();
    working[pos].set_sort_index(b);
    working[neighbour].set_sort_index(a);

    Ok(Reorder::Changed(changed_items(collection, &working)))
}

/// Swap `id` with its predecessor
pub fn move_up<T: Sortable>(collection: &[T], id: T::Id) -> DomainResult<Reorder<T>> {
    swap_with_neighbour(collection, id, Direction::Up)
}

/// Swap `id` with its successor
pub fn move_down<T: Sortable>(collection: &[T], id: T::Id) -> DomainResult<Reorder<T>> {
    swap_with_neighbour(collection, id, Direction::Down)
}

/// Drag `source` next to `target`.
///
/// A source that sorted before the target lands right after it, a source
/// that sorted after lands right before it. Only the span between the two
/// is renumbered, reusing the indices already held by that span, so items
/// outside it keep their keys.
pub fn move_item_to_item<T: Sortable>(
    collection: &[T],
    source: T::Id,
    target: T::Id,
) -> DomainResult<Reorder<T>> {
    let sorted = sorted_list(collection);
    let from = locate(&sorted, source)?;
    let to = locate(&sorted, target)?;
    if from == to {
        return Ok(Reorder::Unchanged);
    }

    let mut working = consistent(collection);
    let (lo, hi) = (from.min(to), from.max(to));
    let keys: Vec<i64> = working[lo..=hi].iter().map(|item| item.sort_index()).collect();

    let span = &mut working[lo..=hi];
    if from < to {
        span.rotate_left(1);
    } else {
        span.rotate_right(1);
    }
    for (item, key) in span.iter_mut().zip(keys) {
        item.set_sort_index(key);
    }

    Ok(Reorder::Changed(changed_items(collection, &working)))
}
