//! Heading Membership
//!
//! Entries are ordered among their peers: the sibling entries of their
//! heading, or the direct entries and headings of the list. Moving an entry
//! into or out of a heading changes its parent and appends it to the new
//! peer set instead of repositioning it.

use log::debug;

use super::moves::{self, Reorder};
use super::sort_index::{changed_items, check_uniqueness, next_sort_index, repair};
use crate::domain::{
    DomainError, DomainResult, EquipmentList, ListEntry, ListHeading, ListRow, ListRowId,
};

fn heading_peers(heading: &ListHeading) -> Vec<ListRow> {
    heading.entries.iter().cloned().map(ListRow::Entry).collect()
}

/// The collection `row` is ordered in
pub fn peers(list: &EquipmentList, row: ListRowId) -> DomainResult<Vec<ListRow>> {
    let entry_id = match row {
        ListRowId::Heading(heading_id) => {
            if list.heading(heading_id).is_none() {
                return Err(DomainError::NotFound(format!("Heading {} not found", heading_id)));
            }
            return Ok(list.rows());
        }
        ListRowId::Entry(entry_id) => entry_id,
    };

    if let Some(entry) = list.entries.iter().find(|e| e.id == entry_id) {
        if let Some(heading_id) = entry.heading_id {
            return Err(DomainError::InvalidInput(format!(
                "Entry {} is listed directly but references heading {}",
                entry_id, heading_id
            )));
        }
        return Ok(list.rows());
    }

    for heading in &list.headings {
        if let Some(entry) = heading.entry(entry_id) {
            if entry.heading_id != Some(heading.id) {
                return Err(DomainError::InvalidInput(format!(
                    "Entry {} is stored under heading {} but references {:?}",
                    entry_id, heading.id, entry.heading_id
                )));
            }
            return Ok(heading_peers(heading));
        }
    }

    Err(DomainError::NotFound(format!("Entry {} not found", entry_id)))
}

pub fn move_row_up(list: &EquipmentList, row: ListRowId) -> DomainResult<Reorder<ListRow>> {
    moves::move_up(&peers(list, row)?, row)
}

pub fn move_row_down(list: &EquipmentList, row: ListRowId) -> DomainResult<Reorder<ListRow>> {
    moves::move_down(&peers(list, row)?, row)
}

/// Drag within one peer set; a target outside the source's peers is
/// reported as not found.
pub fn move_row_to_row(
    list: &EquipmentList,
    source: ListRowId,
    target: ListRowId,
) -> DomainResult<Reorder<ListRow>> {
    moves::move_item_to_item(&peers(list, source)?, source, target)
}

/// Merge maintainer output back into the list
pub fn apply_rows(list: &mut EquipmentList, changes: &[ListRow]) -> DomainResult<()> {
    for change in changes {
        match change {
            ListRow::Heading(heading) => {
                list.heading_mut(heading.id)?.sort_index = heading.sort_index;
            }
            ListRow::Entry(entry) => {
                let slot = match entry.heading_id {
                    Some(heading_id) => list.heading_mut(heading_id)?.entries.iter_mut(),
                    None => list.entries.iter_mut(),
                }
                .find(|e| e.id == entry.id)
                .ok_or_else(|| DomainError::NotFound(format!("Entry {} not found", entry.id)))?;
                slot.sort_index = entry.sort_index;
            }
        }
    }
    Ok(())
}

/// Re-parent an entry (`None` = directly on the list) and append it to the
/// new peer set. Returns the updated entry; merge it with
/// `EquipmentList::upsert_entry`.
pub fn move_into_heading(
    list: &EquipmentList,
    entry_id: u32,
    heading_id: Option<u32>,
) -> DomainResult<Reorder<ListEntry>> {
    // validates the current parent link as well
    peers(list, ListRowId::Entry(entry_id))?;
    let mut entry = list
        .entry(entry_id)
        .cloned()
        .ok_or_else(|| DomainError::NotFound(format!("Entry {} not found", entry_id)))?;

    if entry.heading_id == heading_id {
        return Ok(Reorder::Unchanged);
    }

    entry.sort_index = match heading_id {
        Some(id) => {
            let heading = list
                .heading(id)
                .ok_or_else(|| DomainError::NotFound(format!("Heading {} not found", id)))?;
            next_sort_index(&heading.entries)?
        }
        None => next_sort_index(&list.rows())?,
    };
    debug!("Entry {} moves from {:?} to {:?}", entry_id, entry.heading_id, heading_id);
    entry.heading_id = heading_id;

    Ok(Reorder::Changed(vec![entry]))
}

/// Append a new entry directly to the list or under `heading_id`
pub fn add_entry(
    list: &mut EquipmentList,
    mut entry: ListEntry,
    heading_id: Option<u32>,
) -> DomainResult<ListEntry> {
    if list.entry(entry.id).is_some() {
        return Err(DomainError::Conflict(format!("Entry {} already exists", entry.id)));
    }
    entry.sort_index = match heading_id {
        Some(id) => {
            let heading = list
                .heading(id)
                .ok_or_else(|| DomainError::NotFound(format!("Heading {} not found", id)))?;
            next_sort_index(&heading.entries)?
        }
        None => next_sort_index(&list.rows())?,
    };
    entry.heading_id = heading_id;
    list.upsert_entry(entry.clone())?;
    Ok(entry)
}

/// Append a new heading after every direct entry and heading
pub fn add_heading(list: &mut EquipmentList, mut heading: ListHeading) -> DomainResult<ListHeading> {
    if list.heading(heading.id).is_some() {
        return Err(DomainError::Conflict(format!("Heading {} already exists", heading.id)));
    }
    heading.sort_index = next_sort_index(&list.rows())?;
    for entry in &mut heading.entries {
        entry.heading_id = Some(heading.id);
    }
    list.headings.push(heading.clone());
    Ok(heading)
}

/// Repair every peer set of the list that has duplicate indices.
/// Returns the number of rows renumbered.
pub fn repair_list(list: &mut EquipmentList) -> DomainResult<usize> {
    let mut renumbered = 0;

    let rows = list.rows();
    if !check_uniqueness(&rows) {
        let changes = changed_items(&rows, &repair(&rows));
        apply_rows(list, &changes)?;
        renumbered += changes.len();
    }

    for heading in &mut list.headings {
        if !check_uniqueness(&heading.entries) {
            let repaired = repair(&heading.entries);
            renumbered += changed_items(&heading.entries, &repaired).len();
            heading.entries = repaired;
        }
    }

    Ok(renumbered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entity, Sortable};
    use crate::ordering::sorted_list;

    fn entry(id: u32, sort_index: i64, heading_id: Option<u32>) -> ListEntry {
        let mut entry = ListEntry::new(id, format!("Entry {}", id), sort_index);
        entry.heading_id = heading_id;
        entry
    }

    /// Entries 1 (10), heading 1 (20) with entries 2 (10) and 3 (20), entry 4 (30)
    fn sample_list() -> EquipmentList {
        let mut list = EquipmentList::new(1, "Main".to_string(), 10);
        list.entries.push(entry(1, 10, None));
        list.entries.push(entry(4, 30, None));
        let mut heading = ListHeading::new(1, "Lights".to_string(), 20);
        heading.entries.push(entry(2, 10, Some(1)));
        heading.entries.push(entry(3, 20, Some(1)));
        list.headings.push(heading);
        list
    }

    fn row_order(list: &EquipmentList) -> Vec<ListRowId> {
        sorted_list(&list.rows()).iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_peers_of_direct_entry() {
        let list = sample_list();
        let ids: Vec<ListRowId> = peers(&list, ListRowId::Entry(1)).unwrap().iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&ListRowId::Heading(1)));
    }

    #[test]
    fn test_peers_of_heading_child() {
        let list = sample_list();
        let ids: Vec<ListRowId> = peers(&list, ListRowId::Entry(3)).unwrap().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![ListRowId::Entry(2), ListRowId::Entry(3)]);
    }

    #[test]
    fn test_peers_rejects_malformed_parent_link() {
        let mut list = sample_list();
        list.headings[0].entries[0].heading_id = Some(7);
        assert!(matches!(peers(&list, ListRowId::Entry(2)), Err(DomainError::InvalidInput(_))));
        list.entries[0].heading_id = Some(1);
        assert!(matches!(peers(&list, ListRowId::Entry(1)), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_peers_unknown_row() {
        let list = sample_list();
        assert!(matches!(peers(&list, ListRowId::Entry(99)), Err(DomainError::NotFound(_))));
        assert!(matches!(peers(&list, ListRowId::Heading(99)), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_move_heading_up_swaps_with_entry() {
        let mut list = sample_list();
        let changes = move_row_up(&list, ListRowId::Heading(1)).unwrap().into_changed();
        assert_eq!(changes.len(), 2);
        apply_rows(&mut list, &changes).unwrap();
        assert_eq!(
            row_order(&list),
            vec![ListRowId::Heading(1), ListRowId::Entry(1), ListRowId::Entry(4)]
        );
        // children keep their own order
        assert_eq!(list.headings[0].entries.len(), 2);
    }

    #[test]
    fn test_move_with_tied_heading_repairs_heading() {
        let mut list = sample_list();
        list.headings[0].sort_index = 10;
        // entry 1 sorts before heading 1 on the tie
        let changes = move_row_up(&list, ListRowId::Entry(4)).unwrap().into_changed();
        let ids: Vec<(ListRowId, i64)> = changes.iter().map(|r| (r.id(), r.sort_index())).collect();
        assert_eq!(ids, vec![(ListRowId::Heading(1), 30), (ListRowId::Entry(4), 20)]);

        apply_rows(&mut list, &changes).unwrap();
        assert_eq!(list.headings[0].sort_index, 30);
        assert!(check_uniqueness(&list.rows()));
        assert_eq!(
            row_order(&list),
            vec![ListRowId::Entry(1), ListRowId::Entry(4), ListRowId::Heading(1)]
        );
    }

    #[test]
    fn test_move_child_stays_within_heading() {
        let mut list = sample_list();
        assert!(move_row_down(&list, ListRowId::Entry(3)).unwrap().is_unchanged());
        let changes = move_row_up(&list, ListRowId::Entry(3)).unwrap().into_changed();
        apply_rows(&mut list, &changes).unwrap();
        let children: Vec<u32> = sorted_list(&list.headings[0].entries).iter().map(|e| e.id).collect();
        assert_eq!(children, vec![3, 2]);
        // list level untouched
        assert_eq!(list.entries[0].sort_index, 10);
        assert_eq!(list.headings[0].sort_index, 20);
    }

    #[test]
    fn test_drag_across_peer_sets_is_rejected() {
        let list = sample_list();
        let err = move_row_to_row(&list, ListRowId::Entry(1), ListRowId::Entry(2)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_drag_entry_below_heading() {
        let mut list = sample_list();
        let changes = move_row_to_row(&list, ListRowId::Entry(1), ListRowId::Heading(1))
            .unwrap()
            .into_changed();
        apply_rows(&mut list, &changes).unwrap();
        assert_eq!(
            row_order(&list),
            vec![ListRowId::Heading(1), ListRowId::Entry(1), ListRowId::Entry(4)]
        );
    }

    #[test]
    fn test_move_into_heading_appends() {
        let mut list = sample_list();
        let changes = move_into_heading(&list, 4, Some(1)).unwrap().into_changed();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].heading_id, Some(1));
        assert_eq!(changes[0].sort_index, 30);
        list.upsert_entry(changes[0].clone()).unwrap();
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.headings[0].entries.len(), 3);
    }

    #[test]
    fn test_move_out_of_heading_appends_to_list() {
        let mut list = sample_list();
        let changes = move_into_heading(&list, 2, None).unwrap().into_changed();
        assert_eq!(changes[0].sort_index, 40);
        list.upsert_entry(changes[0].clone()).unwrap();
        assert_eq!(row_order(&list).last(), Some(&ListRowId::Entry(2)));
    }

    #[test]
    fn test_move_into_same_heading_is_noop() {
        let list = sample_list();
        assert!(move_into_heading(&list, 2, Some(1)).unwrap().is_unchanged());
        assert!(move_into_heading(&list, 1, None).unwrap().is_unchanged());
    }

    #[test]
    fn test_move_into_unknown_heading_fails() {
        let list = sample_list();
        assert!(matches!(move_into_heading(&list, 1, Some(5)), Err(DomainError::NotFound(_))));
        assert!(matches!(move_into_heading(&list, 77, None), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_add_entry_and_heading() {
        let mut list = sample_list();
        let added = add_entry(&mut list, ListEntry::new(5, "Cable".to_string(), 0), Some(1)).unwrap();
        assert_eq!(added.sort_index, 30);
        assert_eq!(added.heading_id, Some(1));

        let heading = add_heading(&mut list, ListHeading::new(2, "Sound".to_string(), 0)).unwrap();
        assert_eq!(heading.sort_index, 40);

        let direct = add_entry(&mut list, ListEntry::new(6, "Tape".to_string(), 0), None).unwrap();
        assert_eq!(direct.sort_index, 50);

        let err = add_entry(&mut list, ListEntry::new(6, "Tape".to_string(), 0), None).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_repair_list() {
        let mut list = sample_list();
        list.entries[1].sort_index = 10;
        list.headings[0].entries[1].sort_index = 10;
        let renumbered = repair_list(&mut list).unwrap();
        assert!(renumbered > 0);
        assert!(check_uniqueness(&list.rows()));
        assert!(check_uniqueness(&list.headings[0].entries));
        assert_eq!(repair_list(&mut list).unwrap(), 0);
    }
}
