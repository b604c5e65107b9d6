// ==========================================
// Abrazaderas - quoter configuration
// ==========================================
// Weight table, price lists, multipliers and catalog hints.
// Defaults reproduce the commercial tables in use; a JSON file may override
// any subset of fields.
// ==========================================

use crate::config::ConfigError;
use crate::engine::clamp_code::CatalogHints;
use crate::engine::diameter_table::DiameterTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Steel weight per meter for one diameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiameterWeight {
    pub diameter: String,
    pub kg_per_meter: Decimal,
}

/// Price list row definition: `final = round(base * multiplier, 2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub key: String,
    pub label: String,
    pub multiplier: Decimal,
}

/// Extra human <-> compact diameter pair layered over the standard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiameterMapping {
    pub human: String,
    pub compact: String,
}

// ==========================================
// QuoterConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoterConfig {
    /// Ordered; also the order of the diameter options offered to users.
    pub weights: Vec<DiameterWeight>,
    pub price_lists: Vec<PriceList>,
    pub zinc_multiplier: Decimal,
    pub laminated_multiplier: Decimal,
    pub default_supplier_discount_pct: Decimal,
    pub default_general_increase_pct: Decimal,
    pub extra_diameters: Vec<DiameterMapping>,
    pub known_widths: BTreeSet<u32>,
    pub known_lengths: BTreeSet<u32>,
}

fn weight(diameter: &str, kg_per_meter: Decimal) -> DiameterWeight {
    DiameterWeight {
        diameter: diameter.to_string(),
        kg_per_meter,
    }
}

fn price_list(key: &str, label: &str, multiplier: Decimal) -> PriceList {
    PriceList {
        key: key.to_string(),
        label: label.to_string(),
        multiplier,
    }
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            weights: vec![
                weight("7/16", Decimal::new(76, 2)),
                weight("1/2", Decimal::new(993, 3)),
                weight("9/16", Decimal::new(1258, 3)),
                weight("5/8", Decimal::new(1553, 3)),
                weight("3/4", Decimal::new(2236, 3)),
                weight("7/8", Decimal::new(3043, 3)),
                weight("1", Decimal::new(3975, 3)),
                weight("18", Decimal::new(192, 2)),
                weight("20", Decimal::new(25, 1)),
                weight("22", Decimal::new(3043, 3)),
                weight("24", Decimal::new(38, 1)),
            ],
            price_lists: vec![
                price_list("lista_1", "Lista 1", Decimal::new(14, 1)),
                price_list("lista_2", "Lista 2", Decimal::new(15, 1)),
                price_list("lista_3", "Lista 3", Decimal::new(16, 1)),
                price_list("lista_4", "Lista 4", Decimal::new(17, 1)),
                price_list("facturacion", "Facturacion", Decimal::new(20, 1)),
            ],
            zinc_multiplier: Decimal::new(120, 2),
            laminated_multiplier: Decimal::new(20, 1),
            default_supplier_discount_pct: Decimal::ZERO,
            default_general_increase_pct: Decimal::new(23, 0),
            extra_diameters: Vec::new(),
            known_widths: BTreeSet::new(),
            known_lengths: BTreeSet::new(),
        }
    }
}

impl QuoterConfig {
    pub fn weight_for(&self, diameter: &str) -> Option<Decimal> {
        self.weights
            .iter()
            .find(|w| w.diameter == diameter)
            .map(|w| w.kg_per_meter)
    }

    /// Standard diameter table plus `extra_diameters`.
    pub fn diameter_table(&self) -> DiameterTable {
        DiameterTable::default().extended(
            self.extra_diameters
                .iter()
                .map(|m| (m.human.as_str(), m.compact.as_str())),
        )
    }

    pub fn catalog_hints(&self) -> CatalogHints {
        CatalogHints::new(
            self.known_widths.iter().copied(),
            self.known_lengths.iter().copied(),
        )
    }

    /// Reject tables the quoter cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.is_empty() {
            return Err(ConfigError::Invalid("weights must not be empty".to_string()));
        }
        if let Some(w) = self.weights.iter().find(|w| w.kg_per_meter <= Decimal::ZERO) {
            return Err(ConfigError::Invalid(format!(
                "weight for diameter {} must be positive",
                w.diameter
            )));
        }
        if self.price_lists.is_empty() {
            return Err(ConfigError::Invalid(
                "price_lists must not be empty".to_string(),
            ));
        }
        let mut keys = BTreeSet::new();
        for list in &self.price_lists {
            if list.multiplier <= Decimal::ZERO {
                return Err(ConfigError::Invalid(format!(
                    "multiplier for price list {} must be positive",
                    list.key
                )));
            }
            if !keys.insert(list.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate price list key {}",
                    list.key
                )));
            }
        }
        if self.zinc_multiplier <= Decimal::ZERO || self.laminated_multiplier <= Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "zinc and laminated multipliers must be positive".to_string(),
            ));
        }
        if self.default_supplier_discount_pct < Decimal::ZERO
            || self.default_general_increase_pct < Decimal::ZERO
        {
            return Err(ConfigError::Invalid(
                "default percentages must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let config = QuoterConfig::default();
        assert_eq!(config.weights.len(), 11);
        assert_eq!(config.weight_for("1/2"), Some(Decimal::new(993, 3)));
        assert_eq!(config.weight_for("11/16"), None);
        assert_eq!(config.price_lists.last().map(|p| p.key.as_str()), Some("facturacion"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let raw = r#"{
            "default_general_increase_pct": "30",
            "known_widths": [80, 100],
            "extra_diameters": [{"human": "1 1/8", "compact": "118"}]
        }"#;
        let config: QuoterConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.default_general_increase_pct, Decimal::new(30, 0));
        assert_eq!(config.weights.len(), 11);
        assert!(config.catalog_hints().known_widths.contains(&80));
        assert!(config.diameter_table().contains_compact("118"));
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let mut config = QuoterConfig::default();
        config.weights.clear();
        assert!(config.validate().is_err());

        let mut config = QuoterConfig::default();
        config.price_lists.push(price_list("lista_1", "dup", Decimal::ONE));
        assert!(config.validate().is_err());

        let mut config = QuoterConfig::default();
        config.zinc_multiplier = Decimal::ZERO;
        assert!(config.validate().is_err());
    }
}
