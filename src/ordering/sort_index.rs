//! Sort Index Operations
//!
//! Order queries over a collection keyed by a sparse `sort_index`, and the
//! repair pass that makes the keys unique again.

use log::{debug, warn};
use std::collections::HashMap;

use crate::domain::{DomainError, DomainResult, Sortable};

/// Gap between consecutive indices, also the first index
pub const SORT_INDEX_STEP: i64 = 10;

/// Ascending by `sort_index`, ties broken by ascending ID
pub fn sorted_list<T: Sortable>(collection: &[T]) -> Vec<T> {
    let mut sorted = collection.to_vec();
    sorted.sort_by(|a, b| {
        a.sort_index()
            .cmp(&b.sort_index())
            .then_with(|| a.id().cmp(&b.id()))
    });
    sorted
}

/// Index for an item appended after every existing one.
/// Fails when the largest index leaves no room for another step.
pub fn next_sort_index<T: Sortable>(collection: &[T]) -> DomainResult<i64> {
    match collection.iter().map(|item| item.sort_index()).max() {
        None => Ok(SORT_INDEX_STEP),
        Some(max) => max.checked_add(SORT_INDEX_STEP).ok_or_else(|| {
            DomainError::Conflict(format!("No sort index left after {}, repair the collection", max))
        }),
    }
}

fn order_key<T: Sortable>(item: &T) -> (i64, T::Id) {
    (item.sort_index(), item.id())
}

/// No other member sorts before `item`
pub fn is_first<T: Sortable>(collection: &[T], item: &T) -> bool {
    !collection
        .iter()
        .any(|other| other.id() != item.id() && order_key(other) < order_key(item))
}

/// No other member sorts after `item`
pub fn is_last<T: Sortable>(collection: &[T], item: &T) -> bool {
    !collection
        .iter()
        .any(|other| other.id() != item.id() && order_key(other) > order_key(item))
}

/// True if no two distinct members share a `sort_index`
pub fn check_uniqueness<T: Sortable>(collection: &[T]) -> bool {
    let mut seen: HashMap<i64, T::Id> = HashMap::with_capacity(collection.len());
    for item in collection {
        match seen.get(&item.sort_index()) {
            Some(id) if *id != item.id() => {
                warn!(
                    "Duplicate sort index {} for {:?} and {:?}",
                    item.sort_index(),
                    id,
                    item.id()
                );
                return false;
            }
            _ => {
                seen.insert(item.sort_index(), item.id());
            }
        }
    }
    true
}

/// Sort, then renumber 10, 20, 30, ... keeping the relative order
pub fn repair<T: Sortable>(collection: &[T]) -> Vec<T> {
    let mut repaired = sorted_list(collection);
    for (pos, item) in repaired.iter_mut().enumerate() {
        item.set_sort_index((pos as i64 + 1) * SORT_INDEX_STEP);
    }
    debug!("Repaired sort indices of {} items", repaired.len());
    repaired
}

/// Items of `after` whose `sort_index` differs from their version in `before`
pub(super) fn changed_items<T: Sortable>(before: &[T], after: &[T]) -> Vec<T> {
    let original: HashMap<T::Id, i64> = before
        .iter()
        .map(|item| (item.id(), item.sort_index()))
        .collect();
    after
        .iter()
        .filter(|item| original.get(&item.id()) != Some(&item.sort_index()))
        .cloned()
        .collect()
}
