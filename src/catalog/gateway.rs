// ==========================================
// Abrazaderas - catalog gateway
// ==========================================
// Boundary to the product catalog that owns persistence.
// The engines never talk to storage directly; importers and the request
// materializer go through this trait.
// ==========================================

use crate::domain::clamp::{ClampSpec, ParsedClampSpec};
use crate::domain::types::{Fabrication, Shape};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category imported clamps are filed under.
pub const CLAMP_CATEGORY_NAME: &str = "ABRAZADERAS";

// ==========================================
// ClampSpecRecord - technical attributes stored next to a product
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampSpecRecord {
    pub fabrication: Option<Fabrication>,
    pub diameter: Option<String>,
    pub width: Option<u32>,
    pub length: Option<u32>,
    pub shape: Option<Shape>,
    pub parse_confidence: i32,
    pub parse_warnings: Vec<String>,
    /// Edited by hand; imports must not replace it.
    pub manual_override: bool,
}

impl From<&ParsedClampSpec> for ClampSpecRecord {
    fn from(parsed: &ParsedClampSpec) -> Self {
        Self {
            fabrication: parsed.fabrication,
            diameter: parsed.diameter.clone(),
            width: parsed.width,
            length: parsed.length,
            shape: parsed.shape,
            parse_confidence: parsed.parse_confidence,
            parse_warnings: parsed.parse_warnings.clone(),
            manual_override: false,
        }
    }
}

impl ClampSpecRecord {
    /// Same five technical attributes as `spec`.
    pub fn matches(&self, spec: &ClampSpec) -> bool {
        self.fabrication == Some(spec.fabrication())
            && self.diameter.as_deref() == Some(spec.diameter())
            && self.width == Some(spec.width_mm())
            && self.length == Some(spec.length_mm())
            && self.shape == Some(spec.shape())
    }
}

// ==========================================
// ImportedClamp - one product row from a bulk import
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedClamp {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub specs: ClampSpecRecord,
}

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub created: bool,
    /// False when existing specs were kept because of `manual_override`.
    pub specs_replaced: bool,
}

// ==========================================
// CatalogGateway
// ==========================================
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// A product with this SKU already exists.
    async fn product_exists(&self, sku: &str) -> anyhow::Result<bool>;

    /// SKU of a product whose specs match exactly, if any.
    async fn find_by_specs(&self, spec: &ClampSpec) -> anyhow::Result<Option<String>>;

    /// Create or update the product by SKU and attach its specs.
    ///
    /// Specs flagged `manual_override` on the stored product are left as-is.
    async fn upsert_imported_clamp(&self, clamp: ImportedClamp) -> anyhow::Result<UpsertOutcome>;
}
