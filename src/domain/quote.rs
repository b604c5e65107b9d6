// ==========================================
// Abrazaderas - quote request / result
// ==========================================
// QuoteRequest: raw payload as posted by quoting screens (lenient types)
// QuoteInputs: validated, normalized inputs
// QuoteResult: base cost + one row per price list
// ==========================================

use crate::domain::clamp::EncodedCode;
use crate::domain::types::{Fabrication, Shape};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// QuoteRequest
// ==========================================
// Numeric fields stay as text until validation so that "1.234,5"-style
// input can be reported per field instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub client_name: String,
    /// `trefilada` / `laminada`; absent means trefilada.
    #[serde(deserialize_with = "lenient_opt_text")]
    pub clamp_type: Option<String>,
    /// `PLANA` / `SEMICURVA` / `CURVA`; absent means PLANA.
    #[serde(deserialize_with = "lenient_opt_text")]
    pub profile_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub diameter: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub is_zincated: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub dollar_rate: String,
    #[serde(deserialize_with = "lenient_text")]
    pub steel_price_usd: String,
    /// Absent means the configured default (0).
    #[serde(deserialize_with = "lenient_opt_text")]
    pub supplier_discount_pct: Option<String>,
    /// Absent means the configured default (23).
    #[serde(deserialize_with = "lenient_opt_text")]
    pub general_increase_pct: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub width_mm: String,
    #[serde(deserialize_with = "lenient_text")]
    pub length_mm: String,
}

fn value_to_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

pub(crate) fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

/// Checkbox-style flag: true / "1" / "true" / "on" / "yes".
pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        other => value_to_text(other)
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "on" | "yes"))
            .unwrap_or(false),
    })
}

// ==========================================
// QuoteInputs
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteInputs {
    pub client_name: String,
    pub dollar_rate: Decimal,
    pub steel_price_usd: Decimal,
    pub supplier_discount_pct: Decimal,
    pub general_increase_pct: Decimal,
    pub clamp_type: Fabrication,
    pub is_zincated: bool,
    pub diameter: String,
    pub width_mm: u32,
    pub length_mm: u32,
    pub profile_type: Shape,
}

// ==========================================
// PriceRow / QuoteResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    pub key: String,
    pub label: String,
    pub multiplier: Decimal,
    pub final_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub inputs: QuoteInputs,
    pub base_cost: Decimal,
    pub description: String,
    pub generated_code: String,
    pub generated_code_metadata: EncodedCode,
    pub development_meters: Decimal,
    pub total_weight_kg: Decimal,
    pub price_rows: Vec<PriceRow>,
}

impl QuoteResult {
    pub fn price_for(&self, key: &str) -> Option<&PriceRow> {
        self.price_rows.iter().find(|row| row.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_numbers_and_strings() {
        let raw = r#"{
            "clamp_type": "trefilada",
            "diameter": "1/2",
            "is_zincated": "on",
            "dollar_rate": 1000,
            "steel_price_usd": "1,5",
            "width_mm": 100,
            "length_mm": "200"
        }"#;
        let req: QuoteRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.dollar_rate, "1000");
        assert_eq!(req.steel_price_usd, "1,5");
        assert_eq!(req.width_mm, "100");
        assert!(req.is_zincated);
        assert_eq!(req.profile_type, None);
        assert_eq!(req.general_increase_pct, None);
    }

    #[test]
    fn test_request_flag_false_variants() {
        let req: QuoteRequest = serde_json::from_str(r#"{"is_zincated": "no"}"#).unwrap();
        assert!(!req.is_zincated);
        let req: QuoteRequest = serde_json::from_str(r#"{"is_zincated": true}"#).unwrap();
        assert!(req.is_zincated);
    }
}
