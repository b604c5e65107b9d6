// ==========================================
// Abrazaderas - custom measure request -> catalog product
// ==========================================
// Pure helpers that turn a quoted measure request into the SKU, product
// payload and spec record the catalog stores. Persistence stays with the
// CatalogGateway implementation.
// ==========================================

use crate::catalog::gateway::ClampSpecRecord;
use crate::domain::quote::QuoteRequest;
use crate::domain::types::{Fabrication, Shape};
use crate::engine::quoter::ClampQuoter;
use crate::i18n::t_with_args;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `attributes.source` of products generated from a request.
pub const GENERATED_SOURCE_KEY: &str = "clamp_request";
pub const MAX_SKU_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 255;
const MAX_SKU_ATTEMPTS: u32 = 10_000;
const DEFAULT_PRODUCT_NAME: &str = "ABRAZADERA A MEDIDA";
const FACTURACION_KEY: &str = "facturacion";

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ==========================================
// ClampMeasureRequest
// ==========================================
// Quote saved by a client or an admin, waiting to become a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampMeasureRequest {
    pub id: u64,
    pub client_name: String,
    pub clamp_type: Fabrication,
    pub profile_type: Shape,
    pub diameter: String,
    pub is_zincated: bool,
    pub dollar_rate: Decimal,
    pub steel_price_usd: Decimal,
    pub supplier_discount_pct: Decimal,
    pub general_increase_pct: Decimal,
    pub width_mm: u32,
    pub length_mm: u32,
    pub generated_code: Option<String>,
    pub description: Option<String>,
    pub base_cost: Option<Decimal>,
    pub estimated_final_price: Option<Decimal>,
    pub confirmed_price: Option<Decimal>,
    pub confirmed_price_list: Option<String>,
    pub quantity: u32,
    pub status: String,
}

impl ClampMeasureRequest {
    /// Quote request that reproduces the stored inputs.
    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            client_name: self.client_name.clone(),
            clamp_type: Some(self.clamp_type.quote_key().to_string()),
            profile_type: Some(self.profile_type.as_str().to_string()),
            diameter: self.diameter.clone(),
            is_zincated: self.is_zincated,
            dollar_rate: self.dollar_rate.to_string(),
            steel_price_usd: self.steel_price_usd.to_string(),
            supplier_discount_pct: Some(self.supplier_discount_pct.to_string()),
            general_increase_pct: Some(self.general_increase_pct.to_string()),
            width_mm: self.width_mm.to_string(),
            length_mm: self.length_mm.to_string(),
        }
    }

    /// Confirmed price, else the estimate, else zero.
    fn agreed_price(&self) -> Decimal {
        self.confirmed_price
            .or(self.estimated_final_price)
            .unwrap_or(Decimal::ZERO)
    }
}

// ==========================================
// SKU
// ==========================================

/// Generated code restricted to `[A-Z0-9/_-]`, at most 50 characters.
///
/// Without a usable code: `ABT|ABL + "REQ" + id`.
pub fn build_base_sku(request: &ClampMeasureRequest) -> String {
    let mut raw = request
        .generated_code
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_uppercase();
    if raw.is_empty() {
        raw = format!("{}REQ{}", request.clamp_type.prefix(), request.id);
    }

    let mut compact: String = raw
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '/' | '_' | '-'))
        .collect();
    if compact.is_empty() {
        compact = format!("REQ{}", request.id);
    }
    compact.truncate(MAX_SKU_LEN);
    compact
}

/// First free SKU: `base`, then `base-R1`, `base-R2`, ... (kept within 50 chars).
///
/// Gives up after 9999 suffixes and returns `REQ-<timestamp>`.
pub fn build_unique_sku<F>(base: &str, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut base: String = base.trim().chars().take(MAX_SKU_LEN).collect();
    if base.is_empty() {
        base = "REQ".to_string();
    }
    if !exists(&base) {
        return base;
    }

    for counter in 1..MAX_SKU_ATTEMPTS {
        let suffix = format!("-R{}", counter);
        let keep = MAX_SKU_LEN.saturating_sub(suffix.len()).max(1);
        let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
        if !exists(&candidate) {
            return candidate;
        }
    }

    let mut fallback = format!("REQ-{}", Utc::now().format("%Y%m%d%H%M%S"));
    fallback.truncate(MAX_SKU_LEN);
    fallback
}

// ==========================================
// Product payload / spec record
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestProductAttributes {
    pub source: String,
    pub clamp_request_id: u64,
    pub generated_code: String,
    pub created_from_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestProductPayload {
    pub name: String,
    pub cost: Decimal,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub attributes: RequestProductAttributes,
}

pub fn build_request_product_payload(request: &ClampMeasureRequest) -> RequestProductPayload {
    let name = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_PRODUCT_NAME)
        .chars()
        .take(MAX_NAME_LEN)
        .collect();

    let client = if request.client_name.trim().is_empty() {
        "-"
    } else {
        request.client_name.trim()
    };

    RequestProductPayload {
        name,
        cost: cents(request.base_cost.unwrap_or(Decimal::ZERO)),
        price: cents(request.agreed_price()),
        stock: request.quantity.max(1),
        description: t_with_args(
            "request.generated_description",
            &[("id", &request.id.to_string()), ("client", client)],
        ),
        attributes: RequestProductAttributes {
            source: GENERATED_SOURCE_KEY.to_string(),
            clamp_request_id: request.id,
            generated_code: request.generated_code.clone().unwrap_or_default(),
            created_from_status: request.status.clone(),
        },
    }
}

/// Specs as quoted; flagged as manual so later imports keep them.
pub fn build_spec_record(request: &ClampMeasureRequest) -> ClampSpecRecord {
    ClampSpecRecord {
        fabrication: Some(request.clamp_type),
        diameter: Some(request.diameter.clone()),
        width: Some(request.width_mm),
        length: Some(request.length_mm),
        shape: Some(request.profile_type),
        parse_confidence: 100,
        parse_warnings: Vec::new(),
        manual_override: true,
    }
}

// ==========================================
// Facturacion price
// ==========================================

/// `(base_cost, facturacion_price)` to publish the product with.
///
/// # Rules
/// 1. confirmed on the facturacion list with a positive price: keep it
/// 2. otherwise re-quote and take the facturacion row
/// 3. re-quote failure: stored base cost and agreed price
pub fn facturacion_price(request: &ClampMeasureRequest, quoter: &ClampQuoter) -> (Decimal, Decimal) {
    let fallback_base = cents(request.base_cost.unwrap_or(Decimal::ZERO));
    let fallback_price = cents(request.agreed_price());

    let confirmed_on_facturacion = request
        .confirmed_price_list
        .as_deref()
        .is_some_and(|list| list.trim().eq_ignore_ascii_case(FACTURACION_KEY));
    if confirmed_on_facturacion {
        if let Some(price) = request.confirmed_price.filter(|p| *p > Decimal::ZERO) {
            return (fallback_base, cents(price));
        }
    }

    match quoter.calculate(&request.quote_request()) {
        Ok(quote) => {
            let price = quote
                .price_for(FACTURACION_KEY)
                .map(|row| row.final_price)
                .unwrap_or(fallback_price);
            (cents(quote.base_cost), cents(price))
        }
        Err(e) => {
            warn!(request_id = request.id, error = %e, "re-quote failed, using stored prices");
            (fallback_base, fallback_price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request() -> ClampMeasureRequest {
        ClampMeasureRequest {
            id: 42,
            client_name: "Ferreteria Sur".into(),
            clamp_type: Fabrication::Trefilada,
            profile_type: Shape::Semicurva,
            diameter: "1/2".into(),
            is_zincated: false,
            dollar_rate: dec("1000"),
            steel_price_usd: dec("1"),
            supplier_discount_pct: dec("0"),
            general_increase_pct: dec("23"),
            width_mm: 100,
            length_mm: 200,
            generated_code: Some("abt12100200s".into()),
            description: Some("ABRAZADERA TREFILADA DE 1/2 X 100 X 200 SEMICURVA".into()),
            base_cost: Some(dec("600")),
            estimated_final_price: Some(dec("840.005")),
            confirmed_price: None,
            confirmed_price_list: None,
            quantity: 0,
            status: "quoted".into(),
        }
    }

    #[test]
    fn test_base_sku() {
        assert_eq!(build_base_sku(&request()), "ABT12100200S");

        let no_code = ClampMeasureRequest {
            generated_code: None,
            clamp_type: Fabrication::Laminada,
            ..request()
        };
        assert_eq!(build_base_sku(&no_code), "ABLREQ42");

        let dirty = ClampMeasureRequest {
            generated_code: Some("abt 12.100 ñ".into()),
            ..request()
        };
        assert_eq!(build_base_sku(&dirty), "ABT12100");

        let long = ClampMeasureRequest {
            generated_code: Some("A".repeat(80)),
            ..request()
        };
        assert_eq!(build_base_sku(&long).len(), MAX_SKU_LEN);
    }

    #[test]
    fn test_unique_sku() {
        let taken: HashSet<String> = ["ABT1", "ABT1-R1", "ABT1-R2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(build_unique_sku("ABT2", |s| taken.contains(s)), "ABT2");
        assert_eq!(build_unique_sku("ABT1", |s| taken.contains(s)), "ABT1-R3");
        assert_eq!(build_unique_sku("  ", |_| false), "REQ");

        let long = "B".repeat(50);
        let sku = build_unique_sku(&long, |s| s == long);
        assert_eq!(sku.len(), MAX_SKU_LEN);
        assert!(sku.ends_with("-R1"));

        let sku = build_unique_sku("ABT1", |_| true);
        assert!(sku.starts_with("REQ-"));
    }

    #[test]
    fn test_payload() {
        let payload = build_request_product_payload(&request());
        assert_eq!(payload.name, "ABRAZADERA TREFILADA DE 1/2 X 100 X 200 SEMICURVA");
        assert_eq!(payload.cost, dec("600.00"));
        assert_eq!(payload.price, dec("840.01"));
        assert_eq!(payload.stock, 1);
        assert!(payload.description.contains("42"));
        assert!(payload.description.contains("Ferreteria Sur"));
        assert_eq!(payload.attributes.source, GENERATED_SOURCE_KEY);
        assert_eq!(payload.attributes.generated_code, "abt12100200s");

        let unnamed = ClampMeasureRequest {
            description: None,
            ..request()
        };
        assert_eq!(build_request_product_payload(&unnamed).name, DEFAULT_PRODUCT_NAME);
    }

    #[test]
    fn test_spec_record() {
        let record = build_spec_record(&request());
        assert!(record.manual_override);
        assert_eq!(record.parse_confidence, 100);
        assert_eq!(record.shape, Some(Shape::Semicurva));
    }

    #[test]
    fn test_facturacion_price_requote() {
        let (base, price) = facturacion_price(&request(), &ClampQuoter::default());
        assert_eq!(base, dec("622.91"));
        assert_eq!(price, dec("1245.82"));
    }

    #[test]
    fn test_facturacion_price_confirmed() {
        let confirmed = ClampMeasureRequest {
            confirmed_price: Some(dec("1300")),
            confirmed_price_list: Some(" Facturacion ".into()),
            ..request()
        };
        let (base, price) = facturacion_price(&confirmed, &ClampQuoter::default());
        assert_eq!(base, dec("600"));
        assert_eq!(price, dec("1300"));
    }

    #[test]
    fn test_facturacion_price_fallback() {
        let broken = ClampMeasureRequest {
            diameter: "99".into(),
            ..request()
        };
        let (base, price) = facturacion_price(&broken, &ClampQuoter::default());
        assert_eq!(base, dec("600"));
        assert_eq!(price, dec("840.01"));
    }
}
