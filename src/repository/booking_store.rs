//! Booking Store
//!
//! In-memory booking snapshots. Reorder operations run the list maintainer
//! and merge its result while the store lock is held, so concurrent callers
//! never apply a move computed on a stale snapshot.

use async_trait::async_trait;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::Repository;
use crate::domain::{
    Booking, DomainError, DomainResult, EquipmentList, ListEntry, ListRow, ListRowId,
};
use crate::ordering::hierarchy;

/// In-memory implementation of the Booking repository
#[derive(Clone, Default)]
pub struct BookingStore {
    bookings: Arc<Mutex<BTreeMap<u32, Booking>>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` on one list of one booking under the store lock.
    /// The booking is stamped as updated only when `op` succeeds and the
    /// list actually changed.
    async fn with_list<R>(
        &self,
        booking_id: u32,
        list_id: u32,
        op: impl FnOnce(&mut EquipmentList) -> DomainResult<R>,
    ) -> DomainResult<R> {
        let mut guard = self.bookings.lock().await;
        let booking = guard
            .get_mut(&booking_id)
            .ok_or_else(|| DomainError::NotFound(format!("Booking {} not found", booking_id)))?;

        // Work on a copy so a failed merge leaves the snapshot untouched
        let slot = booking
            .list_mut(list_id)
            .ok_or_else(|| DomainError::NotFound(format!("List {} not found", list_id)))?;
        let mut list = slot.clone();
        let result = op(&mut list)?;

        if list != *slot {
            *slot = list;
            booking.updated_at = Some(chrono::Utc::now().timestamp_millis());
        }
        Ok(result)
    }

    pub async fn move_row_up(&self, booking_id: u32, list_id: u32, row: ListRowId) -> DomainResult<Vec<ListRow>> {
        self.with_list(booking_id, list_id, |list| {
            let changes = hierarchy::move_row_up(list, row)?.into_changed();
            hierarchy::apply_rows(list, &changes)?;
            Ok(changes)
        })
        .await
    }

    pub async fn move_row_down(&self, booking_id: u32, list_id: u32, row: ListRowId) -> DomainResult<Vec<ListRow>> {
        self.with_list(booking_id, list_id, |list| {
            let changes = hierarchy::move_row_down(list, row)?.into_changed();
            hierarchy::apply_rows(list, &changes)?;
            Ok(changes)
        })
        .await
    }

    pub async fn move_row_to_row(
        &self,
        booking_id: u32,
        list_id: u32,
        source: ListRowId,
        target: ListRowId,
    ) -> DomainResult<Vec<ListRow>> {
        self.with_list(booking_id, list_id, |list| {
            let changes = hierarchy::move_row_to_row(list, source, target)?.into_changed();
            hierarchy::apply_rows(list, &changes)?;
            Ok(changes)
        })
        .await
    }

    pub async fn move_entry_into_heading(
        &self,
        booking_id: u32,
        list_id: u32,
        entry_id: u32,
        heading_id: Option<u32>,
    ) -> DomainResult<Vec<ListEntry>> {
        self.with_list(booking_id, list_id, |list| {
            let changes = hierarchy::move_into_heading(list, entry_id, heading_id)?.into_changed();
            for entry in &changes {
                list.upsert_entry(entry.clone())?;
            }
            debug!("Moved entry {} of list {} to heading {:?}", entry_id, list_id, heading_id);
            Ok(changes)
        })
        .await
    }

    pub async fn add_entry(
        &self,
        booking_id: u32,
        list_id: u32,
        entry: ListEntry,
        heading_id: Option<u32>,
    ) -> DomainResult<ListEntry> {
        self.with_list(booking_id, list_id, |list| hierarchy::add_entry(list, entry, heading_id))
            .await
    }

    /// Returns the number of renumbered rows
    pub async fn repair_list(&self, booking_id: u32, list_id: u32) -> DomainResult<usize> {
        self.with_list(booking_id, list_id, hierarchy::repair_list).await
    }
}

#[async_trait]
impl Repository<Booking> for BookingStore {
    async fn create(&self, entity: &Booking) -> DomainResult<Booking> {
        let mut guard = self.bookings.lock().await;
        let mut booking = entity.clone();
        if booking.id == 0 {
            // ID 0 means "assign one"
            booking.id = guard.keys().next_back().map_or(1, |max| max + 1);
        } else if guard.contains_key(&booking.id) {
            return Err(DomainError::Conflict(format!("Booking {} already exists", booking.id)));
        }
        booking.updated_at = Some(chrono::Utc::now().timestamp_millis());
        guard.insert(booking.id, booking.clone());
        debug!("Created booking {}", booking.id);
        Ok(booking)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.lock().await.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Booking>> {
        Ok(self.bookings.lock().await.values().cloned().collect())
    }

    async fn update(&self, entity: &Booking) -> DomainResult<Booking> {
        let mut guard = self.bookings.lock().await;
        let slot = guard
            .get_mut(&entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("Booking {} not found", entity.id)))?;
        *slot = entity.clone();
        slot.updated_at = Some(chrono::Utc::now().timestamp_millis());
        Ok(slot.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        self.bookings
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Booking {} not found", id)))
    }
}
