//! Aggregate Prices
//!
//! Sums over headings, lists and whole bookings, and VAT at the
//! settlement boundary. Sums saturate like the line prices do.

use log::trace;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::line_item::PriceCalculator;
use crate::domain::{Booking, EquipmentList, ListHeading};

/// Booking totals as printed on quotes and invoices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub excluding_vat: Decimal,
    pub vat: Decimal,
    pub including_vat: Decimal,
}

impl PriceCalculator {
    pub fn heading_price(&self, heading: &ListHeading, total_days: u32) -> Decimal {
        heading
            .entries
            .iter()
            .map(|entry| self.price(entry, total_days, true))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Direct entries plus every heading. Heading children are only counted
    /// through their heading.
    pub fn list_price(&self, list: &EquipmentList, total_days: u32) -> Decimal {
        let direct: Decimal = list
            .entries
            .iter()
            .map(|entry| self.price(entry, total_days, true))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let headings: Decimal = list
            .headings
            .iter()
            .map(|heading| self.heading_price(heading, total_days))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        trace!("List {} priced at {} + {}", list.id, direct, headings);
        direct.saturating_add(headings)
    }

    pub fn time_estimates_price(&self, booking: &Booking) -> Decimal {
        booking
            .time_estimates
            .iter()
            .map(|estimate| self.time_estimate_price(estimate))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn time_reports_price(&self, booking: &Booking) -> Decimal {
        booking
            .time_reports
            .iter()
            .map(|report| self.time_report_price(report))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Equipment plus staff time.
    ///
    /// Reported time replaces the estimate as soon as any report exists,
    /// unless `force_estimated_time` is set.
    pub fn booking_price(&self, booking: &Booking, force_estimated_time: bool) -> Decimal {
        let equipment: Decimal = booking
            .equipment_lists
            .iter()
            .map(|list| self.list_price(list, list.total_days))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let time = if !booking.time_reports.is_empty() && !force_estimated_time {
            self.time_reports_price(booking)
        } else {
            self.time_estimates_price(booking)
        };
        trace!("Booking {} priced at {} + {}", booking.id, equipment, time);
        equipment.saturating_add(time)
    }

    pub fn vat(&self, amount: Decimal) -> Decimal {
        amount.saturating_mul(self.config.vat_rate)
    }

    pub fn add_vat(&self, amount: Decimal) -> Decimal {
        amount.saturating_mul(Decimal::ONE + self.config.vat_rate)
    }

    /// Totals rounded to whole cents
    pub fn booking_summary(&self, booking: &Booking, force_estimated_time: bool) -> PriceSummary {
        let excluding_vat = round_currency(self.booking_price(booking, force_estimated_time));
        let vat = round_currency(self.vat(excluding_vat));
        PriceSummary {
            excluding_vat,
            vat,
            including_vat: excluding_vat.saturating_add(vat),
        }
    }
}

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListEntry, PricePlan, TimeEstimate, TimeReport};
    use rust_decimal_macros::dec;

    fn priced_entry(id: u32, units: u32, per_unit: Decimal, heading_id: Option<u32>) -> ListEntry {
        let mut entry = ListEntry::new(id, format!("Entry {}", id), 10 * id as i64);
        entry.number_of_units = units;
        entry.price_per_unit = per_unit;
        entry.heading_id = heading_id;
        entry
    }

    fn sample_list() -> EquipmentList {
        let mut list = EquipmentList::new(1, "Main".to_string(), 10);
        list.entries.push(priced_entry(1, 2, dec!(100), None));
        list.entries.push(priced_entry(2, 1, dec!(40), None));
        let mut heading = ListHeading::new(1, "Lights".to_string(), 30);
        heading.entries.push(priced_entry(3, 4, dec!(25), Some(1)));
        heading.entries.push(priced_entry(4, 1, dec!(10), Some(1)));
        list.headings.push(heading);
        list
    }

    fn sample_booking() -> Booking {
        let mut booking = Booking::new(1, "Festival".to_string(), PricePlan::External);
        booking.equipment_lists.push(sample_list());
        booking.time_estimates.push(TimeEstimate {
            id: 1,
            name: "Setup".to_string(),
            number_of_hours: 4,
            price_per_hour: dec!(300),
            sort_index: 10,
        });
        booking
    }

    #[test]
    fn test_heading_price() {
        let calc = PriceCalculator::default();
        let list = sample_list();
        assert_eq!(calc.heading_price(&list.headings[0], 1), dec!(110));
    }

    #[test]
    fn test_list_price_counts_heading_children_once() {
        let calc = PriceCalculator::default();
        let list = sample_list();
        let direct: Decimal = list.entries.iter().map(|e| calc.price(e, 1, true)).sum();
        let headings: Decimal = list.headings.iter().map(|h| calc.heading_price(h, 1)).sum();
        assert_eq!(calc.list_price(&list, 1), direct + headings);
        assert_eq!(calc.list_price(&list, 1), dec!(350));
    }

    #[test]
    fn test_list_price_with_extra_days() {
        let calc = PriceCalculator::default();
        let list = sample_list();
        // every unit price grows by 50%
        assert_eq!(calc.list_price(&list, 3), dec!(525));
    }

    #[test]
    fn test_booking_uses_estimate_without_reports() {
        let calc = PriceCalculator::default();
        let booking = sample_booking();
        assert_eq!(calc.booking_price(&booking, false), dec!(1550));
    }

    #[test]
    fn test_booking_prefers_reports_unless_forced() {
        let calc = PriceCalculator::default();
        let mut booking = sample_booking();
        booking.time_reports.push(TimeReport {
            id: 1,
            name: "Setup".to_string(),
            billable_working_hours: 2,
            actual_working_hours: 3,
            price_per_hour: dec!(300),
            sort_index: 10,
        });
        assert_eq!(calc.booking_price(&booking, false), dec!(950));
        assert_eq!(calc.booking_price(&booking, true), dec!(1550));
    }

    #[test]
    fn test_booking_uses_each_list_total_days() {
        let calc = PriceCalculator::default();
        let mut booking = sample_booking();
        booking.equipment_lists[0].total_days = 3;
        assert_eq!(calc.booking_price(&booking, false), dec!(1725));
    }

    #[test]
    fn test_add_vat() {
        let calc = PriceCalculator::default();
        assert_eq!(calc.add_vat(dec!(100)), dec!(125));
        assert_eq!(calc.vat(dec!(100)), dec!(25));
    }

    #[test]
    fn test_huge_booking_saturates() {
        let calc = PriceCalculator::default();
        let mut booking = Booking::new(3, "Stadium".to_string(), PricePlan::External);
        let mut list = EquipmentList::new(1, "Rig".to_string(), 10);
        list.entries.push(priced_entry(1, 2, Decimal::MAX, None));
        list.entries.push(priced_entry(2, 1, Decimal::MAX, None));
        booking.equipment_lists.push(list);

        assert_eq!(calc.booking_price(&booking, false), Decimal::MAX);
        assert_eq!(calc.add_vat(Decimal::MAX), Decimal::MAX);
        let summary = calc.booking_summary(&booking, false);
        assert_eq!(summary.including_vat, Decimal::MAX);
    }

    #[test]
    fn test_booking_summary_rounds_to_cents() {
        let calc = PriceCalculator::default();
        let mut booking = Booking::new(2, "Small".to_string(), PricePlan::External);
        let mut list = EquipmentList::new(1, "Only".to_string(), 10);
        list.entries.push(priced_entry(1, 1, dec!(10.01), None));
        booking.equipment_lists.push(list);

        let summary = calc.booking_summary(&booking, false);
        assert_eq!(summary.excluding_vat, dec!(10.01));
        assert_eq!(summary.vat, dec!(2.50));
        assert_eq!(summary.including_vat, dec!(12.51));
    }
}
