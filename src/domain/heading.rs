//! List Heading Entity
//!
//! A named group of entries. The heading itself is positioned among the
//! direct entries of its list; its children are ordered among themselves.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, Sortable};
use super::entry::ListEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListHeading {
    pub id: u32,
    pub name: String,
    pub sort_index: i64,
    /// Child entries, each with `heading_id == Some(self.id)`
    #[serde(default)]
    pub entries: Vec<ListEntry>,
}

impl ListHeading {
    pub fn new(id: u32, name: String, sort_index: i64) -> Self {
        Self {
            id,
            name,
            sort_index,
            entries: Vec::new(),
        }
    }

    pub fn entry(&self, entry_id: u32) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }
}

impl Entity for ListHeading {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Sortable for ListHeading {
    fn sort_index(&self) -> i64 {
        self.sort_index
    }

    fn set_sort_index(&mut self, sort_index: i64) {
        self.sort_index = sort_index;
    }
}
