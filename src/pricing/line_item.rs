//! Line Item Prices
//!
//! Per-entry price components. Hidden entries are free; the charged
//! discount never exceeds the line total. Arithmetic saturates at
//! `Decimal::MAX` / `Decimal::MIN` instead of overflowing.

use rust_decimal::Decimal;

use super::config::PricingConfig;
use crate::domain::{ListEntry, TimeEstimate, TimeReport};

/// Price calculations bound to one pricing configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceCalculator {
    pub(super) config: PricingConfig,
}

impl PriceCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// `number_of_hours * price_per_hour`
    pub fn hourly_price(&self, entry: &ListEntry) -> Decimal {
        if entry.is_hidden {
            return Decimal::ZERO;
        }
        Decimal::from(entry.number_of_hours).saturating_mul(entry.price_per_hour)
    }

    /// Surcharge for every billed day after the first.
    ///
    /// `total_days` is not validated; zero days yields a negative surcharge.
    pub fn extra_days_price(&self, entry: &ListEntry, total_days: u32) -> Decimal {
        if entry.is_hidden {
            return Decimal::ZERO;
        }
        let extra_days = Decimal::from(total_days) - Decimal::ONE;
        entry
            .price_per_unit
            .saturating_mul(extra_days)
            .saturating_mul(self.config.extra_day_rate)
    }

    /// Price of a single unit including hours and extra days
    pub fn unit_price(&self, entry: &ListEntry, total_days: u32) -> Decimal {
        if entry.is_hidden {
            return Decimal::ZERO;
        }
        self.hourly_price(entry)
            .saturating_add(entry.price_per_unit)
            .saturating_add(self.extra_days_price(entry, total_days))
    }

    /// Discount actually granted, capped at the undiscounted line total
    pub fn calculated_discount(&self, entry: &ListEntry, total_days: u32) -> Decimal {
        entry.discount.min(self.price(entry, total_days, false))
    }

    /// Line total, floored at zero
    pub fn price(&self, entry: &ListEntry, total_days: u32, with_discount: bool) -> Decimal {
        if entry.is_hidden {
            return Decimal::ZERO;
        }
        let discount = if with_discount { entry.discount } else { Decimal::ZERO };
        let total = Decimal::from(entry.number_of_units)
            .saturating_mul(self.unit_price(entry, total_days))
            .saturating_sub(discount);
        total.max(Decimal::ZERO)
    }

    pub fn time_estimate_price(&self, estimate: &TimeEstimate) -> Decimal {
        Decimal::from(estimate.number_of_hours).saturating_mul(estimate.price_per_hour)
    }

    pub fn time_report_price(&self, report: &TimeReport) -> Decimal {
        Decimal::from(report.billable_working_hours).saturating_mul(report.price_per_hour)
    }
}
