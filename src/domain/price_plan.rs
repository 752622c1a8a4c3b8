//! Price Plans
//!
//! Equipment carries two parallel rate columns. The plan chosen for a
//! booking decides which column is copied onto new list entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricePlan {
    /// Standard rates
    #[default]
    External,
    /// Discounted member rates
    Member,
}

impl PricePlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePlan::External => "external",
            PricePlan::Member => "member",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "member" => PricePlan::Member,
            _ => PricePlan::External,
        }
    }
}

/// Per-unit and per-hour rate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Rates {
    pub price_per_unit: Decimal,
    pub price_per_hour: Decimal,
}

/// Rate columns of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EquipmentPrice {
    pub external: Rates,
    pub member: Rates,
}

impl EquipmentPrice {
    pub fn rates(&self, plan: PricePlan) -> Rates {
        match plan {
            PricePlan::External => self.external,
            PricePlan::Member => self.member,
        }
    }
}
