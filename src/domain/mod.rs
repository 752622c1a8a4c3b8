//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde and rust_decimal).

mod booking;
mod entity;
mod entry;
mod heading;
mod list;
mod price_plan;

pub use booking::{Booking, TimeEstimate, TimeReport};
pub use entity::{DomainError, DomainResult, Entity, Sortable};
pub use entry::ListEntry;
pub use heading::ListHeading;
pub use list::{EquipmentList, ListRow, ListRowId};
pub use price_plan::{EquipmentPrice, PricePlan, Rates};
