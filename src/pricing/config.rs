//! Pricing Configuration
//!
//! Rates that used to be hard-coded are passed in at construction time.
//! Missing fields fall back to the defaults (25% VAT, 25% per extra day).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// VAT as a fraction, added on top of net amounts
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
    /// Surcharge per extra rental day as a fraction of the unit price
    #[serde(default = "default_extra_day_rate")]
    pub extra_day_rate: Decimal,
}

fn default_vat_rate() -> Decimal {
    dec!(0.25)
}

fn default_extra_day_rate() -> Decimal {
    dec!(0.25)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
            extra_day_rate: default_extra_day_rate(),
        }
    }
}

impl PricingConfig {
    /// Parse a JSON document, e.g. `{"vat_rate": "0.12"}`
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: PricingConfig = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidInput(format!("Pricing config: {}", e)))?;
        config.validate()
    }

    /// Read and parse a JSON config file
    pub fn load(path: &Path) -> DomainResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::InvalidInput(format!("Pricing config {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn validate(self) -> DomainResult<Self> {
        for (name, rate) in [("vat_rate", self.vat_rate), ("extra_day_rate", self.extra_day_rate)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(DomainError::InvalidInput(format!(
                    "{} must be between 0 and 1, got {}",
                    name, rate
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.vat_rate, dec!(0.25));
        assert_eq!(config.extra_day_rate, dec!(0.25));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PricingConfig::from_json(r#"{"vat_rate": "0.12"}"#).unwrap();
        assert_eq!(config.vat_rate, dec!(0.12));
        assert_eq!(config.extra_day_rate, dec!(0.25));
    }

    #[test]
    fn test_rejects_out_of_range_rate() {
        let err = PricingConfig::from_json(r#"{"extra_day_rate": "1.5"}"#).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(PricingConfig::from_json("{vat_rate").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vat_rate": "0.06", "extra_day_rate": "0.5"}}"#).unwrap();
        let config = PricingConfig::load(file.path()).unwrap();
        assert_eq!(config.vat_rate, dec!(0.06));
        assert_eq!(config.extra_day_rate, dec!(0.5));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PricingConfig::load(Path::new("/nonexistent/pricing.json")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
