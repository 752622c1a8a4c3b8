//! Booking Entity
//!
//! A booking owns its equipment lists and the estimated and reported
//! working time billed on top of the equipment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Sortable};
use super::list::EquipmentList;
use super::price_plan::PricePlan;

/// Planned staff time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub id: u32,
    pub name: String,
    pub number_of_hours: u32,
    pub price_per_hour: Decimal,
    pub sort_index: i64,
}

/// Recorded staff time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeReport {
    pub id: u32,
    pub name: String,
    /// Hours charged to the customer
    pub billable_working_hours: u32,
    /// Hours actually worked, informational
    pub actual_working_hours: u32,
    pub price_per_hour: Decimal,
    pub sort_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub price_plan: PricePlan,
    #[serde(default)]
    pub equipment_lists: Vec<EquipmentList>,
    #[serde(default)]
    pub time_estimates: Vec<TimeEstimate>,
    #[serde(default)]
    pub time_reports: Vec<TimeReport>,
    pub updated_at: Option<i64>,
}

impl Booking {
    pub fn new(id: u32, name: String, price_plan: PricePlan) -> Self {
        Self {
            id,
            name,
            price_plan,
            equipment_lists: Vec::new(),
            time_estimates: Vec::new(),
            time_reports: Vec::new(),
            updated_at: None,
        }
    }

    pub fn list(&self, list_id: u32) -> Option<&EquipmentList> {
        self.equipment_lists.iter().find(|l| l.id == list_id)
    }

    pub fn list_mut(&mut self, list_id: u32) -> Option<&mut EquipmentList> {
        self.equipment_lists.iter_mut().find(|l| l.id == list_id)
    }
}

impl Entity for Booking {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

macro_rules! impl_sortable {
    ($($ty:ty),*) => {$(
        impl Entity for $ty {
            type Id = u32;

            fn id(&self) -> Self::Id {
                self.id
            }
        }

        impl Sortable for $ty {
            fn sort_index(&self) -> i64 {
                self.sort_index
            }

            fn set_sort_index(&mut self, sort_index: i64) {
                self.sort_index = sort_index;
            }
        }
    )*};
}

impl_sortable!(TimeEstimate, TimeReport);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_creation() {
        let booking = Booking::new(3, "Spring gala".to_string(), PricePlan::Member);
        assert_eq!(booking.id(), 3);
        assert!(booking.equipment_lists.is_empty());
        assert!(booking.list(1).is_none());
    }

    #[test]
    fn test_booking_deserializes_with_defaults() {
        let booking: Booking =
            serde_json::from_str(r#"{"id": 1, "name": "Gig", "updated_at": null}"#).unwrap();
        assert_eq!(booking.price_plan, PricePlan::External);
        assert!(booking.time_reports.is_empty());
    }
}
