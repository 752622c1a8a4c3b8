//! Equipment List Entity
//!
//! A list owns direct entries and headings. At list level both kinds share
//! one order, so they are handled through the `ListRow` tagged union.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::entity::{DomainError, DomainResult, Entity, Sortable};
use super::entry::ListEntry;
use super::heading::ListHeading;

/// Identity of a list-level row.
///
/// Entries and headings live in separate ID spaces, so the kind is part of
/// the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ListRowId {
    Entry(u32),
    Heading(u32),
}

impl ListRowId {
    pub fn raw(&self) -> u32 {
        match self {
            ListRowId::Entry(id) | ListRowId::Heading(id) => *id,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            ListRowId::Entry(_) => 0,
            ListRowId::Heading(_) => 1,
        }
    }
}

// Ties on sort_index are broken by numeric id, then entries before headings.
impl Ord for ListRowId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw()
            .cmp(&other.raw())
            .then_with(|| self.kind_rank().cmp(&other.kind_rank()))
    }
}

impl PartialOrd for ListRowId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A list-level row: either a direct entry or a heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListRow {
    Entry(ListEntry),
    Heading(ListHeading),
}

impl Entity for ListRow {
    type Id = ListRowId;

    fn id(&self) -> Self::Id {
        match self {
            ListRow::Entry(entry) => ListRowId::Entry(entry.id),
            ListRow::Heading(heading) => ListRowId::Heading(heading.id),
        }
    }
}

impl Sortable for ListRow {
    fn sort_index(&self) -> i64 {
        match self {
            ListRow::Entry(entry) => entry.sort_index,
            ListRow::Heading(heading) => heading.sort_index,
        }
    }

    fn set_sort_index(&mut self, sort_index: i64) {
        match self {
            ListRow::Entry(entry) => entry.sort_index = sort_index,
            ListRow::Heading(heading) => heading.sort_index = sort_index,
        }
    }
}

/// An equipment list of a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentList {
    pub id: u32,
    pub name: String,
    /// Billed rental days (at least 1)
    #[serde(default = "default_total_days")]
    pub total_days: u32,
    pub sort_index: i64,
    /// Entries placed directly on the list
    #[serde(default)]
    pub entries: Vec<ListEntry>,
    #[serde(default)]
    pub headings: Vec<ListHeading>,
}

fn default_total_days() -> u32 {
    1
}

impl EquipmentList {
    pub fn new(id: u32, name: String, sort_index: i64) -> Self {
        Self {
            id,
            name,
            total_days: 1,
            sort_index,
            entries: Vec::new(),
            headings: Vec::new(),
        }
    }

    /// List-level peer set: direct entries and headings
    pub fn rows(&self) -> Vec<ListRow> {
        self.entries
            .iter()
            .cloned()
            .map(ListRow::Entry)
            .chain(self.headings.iter().cloned().map(ListRow::Heading))
            .collect()
    }

    pub fn heading(&self, heading_id: u32) -> Option<&ListHeading> {
        self.headings.iter().find(|h| h.id == heading_id)
    }

    pub fn heading_mut(&mut self, heading_id: u32) -> DomainResult<&mut ListHeading> {
        self.headings
            .iter_mut()
            .find(|h| h.id == heading_id)
            .ok_or_else(|| DomainError::NotFound(format!("Heading {} not found", heading_id)))
    }

    /// Find an entry wherever it sits (directly or under a heading)
    pub fn entry(&self, entry_id: u32) -> Option<&ListEntry> {
        self.entries
            .iter()
            .chain(self.headings.iter().flat_map(|h| h.entries.iter()))
            .find(|e| e.id == entry_id)
    }

    /// All entries, direct ones first, then per heading
    pub fn all_entries(&self) -> impl Iterator<Item = &ListEntry> {
        self.entries
            .iter()
            .chain(self.headings.iter().flat_map(|h| h.entries.iter()))
    }

    /// Remove an entry wherever it sits. Remaining sort indices are kept.
    pub fn remove_entry(&mut self, entry_id: u32) -> DomainResult<ListEntry> {
        if let Some(pos) = self.entries.iter().position(|e| e.id == entry_id) {
            return Ok(self.entries.remove(pos));
        }
        for heading in &mut self.headings {
            if let Some(pos) = heading.entries.iter().position(|e| e.id == entry_id) {
                return Ok(heading.entries.remove(pos));
            }
        }
        Err(DomainError::NotFound(format!("Entry {} not found", entry_id)))
    }

    /// Remove a heading together with its child entries
    pub fn remove_heading(&mut self, heading_id: u32) -> DomainResult<ListHeading> {
        let pos = self
            .headings
            .iter()
            .position(|h| h.id == heading_id)
            .ok_or_else(|| DomainError::NotFound(format!("Heading {} not found", heading_id)))?;
        Ok(self.headings.remove(pos))
    }

    /// Store `entry`, replacing any previous version with the same ID and
    /// placing it according to its `heading_id`.
    pub fn upsert_entry(&mut self, entry: ListEntry) -> DomainResult<()> {
        if let Some(heading_id) = entry.heading_id {
            if self.heading(heading_id).is_none() {
                return Err(DomainError::NotFound(format!("Heading {} not found", heading_id)));
            }
        }
        // Ignore NotFound: a new entry has no previous version
        let _ = self.remove_entry(entry.id);
        match entry.heading_id {
            Some(heading_id) => self.heading_mut(heading_id)?.entries.push(entry),
            None => self.entries.push(entry),
        }
        Ok(())
    }
}

impl Entity for EquipmentList {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Sortable for EquipmentList {
    fn sort_index(&self) -> i64 {
        self.sort_index
    }

    fn set_sort_index(&mut self, sort_index: i64) {
        self.sort_index = sort_index;
    }
}
