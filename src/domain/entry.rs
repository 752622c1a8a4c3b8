//! List Entry Entity
//!
//! A single billable line on an equipment list. An entry sits either
//! directly on the list or under one of the list's headings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Sortable};
use super::price_plan::{EquipmentPrice, PricePlan};

/// A billable equipment line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Unique identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Rented equipment, if the line references the inventory
    pub equipment_id: Option<u32>,
    /// Parent heading (None = directly on the list)
    pub heading_id: Option<u32>,
    /// Position among peers
    pub sort_index: i64,

    pub number_of_units: u32,
    pub number_of_hours: u32,
    pub price_per_unit: Decimal,
    pub price_per_hour: Decimal,
    /// Absolute amount, not a percentage
    pub discount: Decimal,
    /// Hidden lines are printed but never charged
    pub is_hidden: bool,
}

impl ListEntry {
    /// Create a directly listed entry with zero prices
    pub fn new(id: u32, name: String, sort_index: i64) -> Self {
        Self {
            id,
            name,
            equipment_id: None,
            heading_id: None,
            sort_index,
            number_of_units: 1,
            number_of_hours: 0,
            price_per_unit: Decimal::ZERO,
            price_per_hour: Decimal::ZERO,
            discount: Decimal::ZERO,
            is_hidden: false,
        }
    }

    /// Create an entry for a piece of equipment using the rates of `plan`
    pub fn from_equipment(
        id: u32,
        name: String,
        equipment_id: u32,
        price: &EquipmentPrice,
        plan: PricePlan,
        sort_index: i64,
    ) -> Self {
        let rates = price.rates(plan);
        Self {
            equipment_id: Some(equipment_id),
            price_per_unit: rates.price_per_unit,
            price_per_hour: rates.price_per_hour,
            ..Self::new(id, name, sort_index)
        }
    }

    /// Check if the entry sits directly on the list
    pub fn is_direct(&self) -> bool {
        self.heading_id.is_none()
    }
}

impl Entity for ListEntry {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Sortable for ListEntry {
    fn sort_index(&self) -> i64 {
        self.sort_index
    }

    fn set_sort_index(&mut self, sort_index: i64) {
        self.sort_index = sort_index;
    }
}
