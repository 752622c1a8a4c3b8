//! Rental Desk Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - pricing: Line item, list and booking prices
//! - ordering: Sort index maintenance for list rows and headings
//! - repository: Data access abstractions and the in-memory booking store

pub mod domain;
pub mod ordering;
pub mod pricing;
pub mod repository;

pub use domain::{DomainError, DomainResult};
pub use pricing::{PriceCalculator, PricingConfig};
