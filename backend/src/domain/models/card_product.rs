//! Domain model for a card product: the zones a card may call, what each
//! minute costs, and the card's starting balance and weekly fee.
//!
//! Products are plain configuration records. Every card variant shares the
//! same charging and fee logic in [`super::phone_card::PhoneCard`]; only the
//! numbers in its product differ.
//!
//! ## YAML Format
//!
//! ```yaml
//! name: SmartAmericas10
//! initial_balance: "10.00"
//! weekly_fee: "0.30"
//! price_table:
//!   Canada: "0.03"
//!   Usa: "0.05"
//!   LatinAmerica: "0.10"
//! ```

use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use shared::CallZone;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ProductConfigError {
    #[error("Failed to read product file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse product YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid product: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProduct {
    pub name: String,
    /// Price per minute for every allowed zone; zones not listed cannot be called
    pub price_table: BTreeMap<CallZone, Decimal>,
    pub initial_balance: Decimal,
    pub weekly_fee: Decimal,
}

impl CardProduct {
    pub const SMART_AMERICAS_10: &'static str = "SmartAmericas10";

    /// Calls to Canada, the USA and Latin America only. $10.00 to start,
    /// $0.30 a week.
    pub fn smart_americas_10() -> Self {
        let price_table = BTreeMap::from([
            (CallZone::Canada, dec!(0.03)),
            (CallZone::Usa, dec!(0.05)),
            (CallZone::LatinAmerica, dec!(0.10)),
        ]);
        Self {
            name: Self::SMART_AMERICAS_10.to_string(),
            price_table,
            initial_balance: dec!(10.00),
            weekly_fee: dec!(0.30),
        }
    }

    /// Parse and validate a product from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ProductConfigError> {
        let product: CardProduct = serde_yaml::from_str(yaml)?;
        product.validate()?;
        debug!(
            "Parsed product {} with {} allowed zones",
            product.name,
            product.price_table.len()
        );
        Ok(product)
    }

    /// Load a product definition from a YAML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ProductConfigError> {
        let path = path.as_ref();
        info!("Loading card product from {}", path.display());
        let yaml_content = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml_content)
    }

    pub fn to_yaml_string(&self) -> Result<String, ProductConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ProductConfigError> {
        if self.name.trim().is_empty() {
            return Err(ProductConfigError::Invalid("name cannot be empty".to_string()));
        }
        if self.price_table.is_empty() {
            return Err(ProductConfigError::Invalid(format!(
                "{} allows no call zones",
                self.name
            )));
        }
        if let Some((zone, price)) = self.price_table.iter().find(|(_, price)| **price < Decimal::ZERO) {
            return Err(ProductConfigError::Invalid(format!(
                "price for zone {} is negative: {}",
                zone, price
            )));
        }
        if self.initial_balance < Decimal::ZERO {
            return Err(ProductConfigError::Invalid(format!(
                "initial balance is negative: {}",
                self.initial_balance
            )));
        }
        if self.weekly_fee < Decimal::ZERO {
            return Err(ProductConfigError::Invalid(format!(
                "weekly fee is negative: {}",
                self.weekly_fee
            )));
        }
        Ok(())
    }

    pub fn allowed_zones(&self) -> BTreeSet<CallZone> {
        self.price_table.keys().copied().collect()
    }

    pub fn is_allowed(&self, zone: CallZone) -> bool {
        self.price_table.contains_key(&zone)
    }

    /// Price per minute, or `None` when the zone cannot be called on this product
    pub fn cost_per_min(&self, zone: CallZone) -> Option<Decimal> {
        self.price_table.get(&zone).copied()
    }
}

impl Default for CardProduct {
    fn default() -> Self {
        Self::smart_americas_10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EUROPE_YAML: &str = r#"
name: SmartEurope5
initial_balance: "5.00"
weekly_fee: "0.25"
price_table:
  Europe: "0.08"
  Canada: "0.04"
"#;

    #[test]
    fn test_smart_americas_10_prices() {
        let product = CardProduct::smart_americas_10();

        assert_eq!(product.cost_per_min(CallZone::Canada), Some(dec!(0.03)));
        assert_eq!(product.cost_per_min(CallZone::Usa), Some(dec!(0.05)));
        assert_eq!(product.cost_per_min(CallZone::LatinAmerica), Some(dec!(0.10)));
        assert_eq!(product.cost_per_min(CallZone::Europe), None);
        assert_eq!(product.initial_balance, dec!(10.00));
        assert_eq!(product.weekly_fee, dec!(0.30));
    }

    #[test]
    fn test_smart_americas_10_allowed_zones() {
        let product = CardProduct::smart_americas_10();

        let expected: BTreeSet<CallZone> =
            [CallZone::Canada, CallZone::Usa, CallZone::LatinAmerica].into_iter().collect();
        assert_eq!(product.allowed_zones(), expected);

        for zone in CallZone::ALL {
            assert_eq!(product.is_allowed(zone), expected.contains(&zone));
        }
    }

    #[test]
    fn test_from_yaml_str() {
        let product = CardProduct::from_yaml_str(EUROPE_YAML).unwrap();

        assert_eq!(product.name, "SmartEurope5");
        assert_eq!(product.initial_balance, dec!(5.00));
        assert_eq!(product.weekly_fee, dec!(0.25));
        assert!(product.is_allowed(CallZone::Europe));
        assert!(!product.is_allowed(CallZone::Usa));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EUROPE_YAML.as_bytes()).unwrap();

        let product = CardProduct::load_from_file(file.path()).unwrap();
        assert_eq!(product.cost_per_min(CallZone::Canada), Some(dec!(0.04)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CardProduct::load_from_file(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ProductConfigError::Io(_))));
    }

    #[test]
    fn test_yaml_round_trip_of_builtin_product() {
        let product = CardProduct::smart_americas_10();
        let yaml = product.to_yaml_string().unwrap();
        assert_eq!(CardProduct::from_yaml_str(&yaml).unwrap(), product);
    }

    #[test]
    fn test_malformed_yaml() {
        let result = CardProduct::from_yaml_str("name: [unterminated");
        assert!(matches!(result, Err(ProductConfigError::Yaml(_))));
    }

    #[test]
    fn test_rejects_invalid_products() {
        let mut product = CardProduct::smart_americas_10();
        product.price_table.clear();
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));

        let mut product = CardProduct::smart_americas_10();
        product.price_table.insert(CallZone::Asia, dec!(-0.01));
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));

        let mut product = CardProduct::smart_americas_10();
        product.weekly_fee = dec!(-1);
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));

        let mut product = CardProduct::smart_americas_10();
        product.initial_balance = dec!(-1);
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));

        let mut product = CardProduct::smart_americas_10();
        product.name = "   ".to_string();
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));
    }

    #[test]
    fn test_accepts_zero_and_negative_zero_amounts() {
        let yaml = r#"
name: FreeCanada
initial_balance: "-0.00"
weekly_fee: "0"
price_table:
  Canada: "0.00"
  Usa: "-0.00"
"#;
        let product = CardProduct::from_yaml_str(yaml).unwrap();

        assert_eq!(product.initial_balance, Decimal::ZERO);
        assert_eq!(product.weekly_fee, Decimal::ZERO);
        assert_eq!(product.cost_per_min(CallZone::Canada), Some(Decimal::ZERO));
        assert_eq!(product.cost_per_min(CallZone::Usa), Some(Decimal::ZERO));
    }

    #[test]
    fn test_rejects_smallest_negative_amounts() {
        let mut product = CardProduct::smart_americas_10();
        product.weekly_fee = dec!(-0.01);
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));

        let mut product = CardProduct::smart_americas_10();
        product.initial_balance = dec!(-0.01);
        assert!(matches!(product.validate(), Err(ProductConfigError::Invalid(_))));
    }
}
