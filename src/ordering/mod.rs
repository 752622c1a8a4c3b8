//! Ordered List Maintainer
//!
//! Keeps a total order over a collection through sparse `sort_index` keys:
//! - sort_index: order queries, uniqueness check and repair
//! - moves: move up/down and drag-to-target
//! - hierarchy: peer sets of list rows and heading membership

pub mod hierarchy;
mod moves;
mod sort_index;

pub use moves::{merge_sort_indices, move_down, move_item_to_item, move_up, Reorder};
pub use sort_index::{
    check_uniqueness, is_first, is_last, next_sort_index, repair, sorted_list, SORT_INDEX_STEP,
};
