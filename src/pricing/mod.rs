//! Pricing Engine
//!
//! Pure price calculations over list entries, time estimates and reports:
//! - line_item: per-entry price components
//! - totals: heading, list and booking sums, VAT
//! - config: rates supplied at construction

mod config;
mod line_item;
mod totals;

pub use config::PricingConfig;
pub use line_item::PriceCalculator;
pub use totals::PriceSummary;
