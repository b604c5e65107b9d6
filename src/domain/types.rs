// ==========================================
// Abrazaderas - domain enums
// ==========================================
// Fabrication / profile shape / request fields
// Serialized as SCREAMING_SNAKE_CASE (same as catalog records)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Fabrication
// ==========================================
// ABT = TREFILADA (drawn), ABL = LAMINADA (rolled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fabrication {
    Trefilada,
    Laminada,
}

impl Fabrication {
    /// Three-letter code prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Fabrication::Trefilada => "ABT",
            Fabrication::Laminada => "ABL",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ABT" => Some(Fabrication::Trefilada),
            "ABL" => Some(Fabrication::Laminada),
            _ => None,
        }
    }

    /// Resolve a type alias: full name or prefix, case-insensitive.
    pub fn from_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "ABT" | "TREFILADA" => Some(Fabrication::Trefilada),
            "ABL" | "LAMINADA" => Some(Fabrication::Laminada),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Fabrication::Trefilada => "TREFILADA",
            Fabrication::Laminada => "LAMINADA",
        }
    }

    /// Lowercase key used by quote requests (`clamp_type`).
    pub fn quote_key(self) -> &'static str {
        match self {
            Fabrication::Trefilada => "trefilada",
            Fabrication::Laminada => "laminada",
        }
    }
}

impl fmt::Display for Fabrication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Shape (profile)
// ==========================================
// Priority when reading free text: SEMICURVA > CURVA > PLANA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    Plana,
    Curva,
    Semicurva,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Plana, Shape::Semicurva, Shape::Curva];

    /// One-letter code suffix.
    pub fn code(self) -> &'static str {
        match self {
            Shape::Curva => "C",
            Shape::Plana => "P",
            Shape::Semicurva => "S",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Shape::Curva),
            "P" => Some(Shape::Plana),
            "S" => Some(Shape::Semicurva),
            _ => None,
        }
    }

    /// Resolve a shape alias: full name or one-letter code, case-insensitive.
    pub fn from_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "C" | "CURVA" => Some(Shape::Curva),
            "P" | "PLANA" => Some(Shape::Plana),
            "S" | "SEMICURVA" => Some(Shape::Semicurva),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Plana => "PLANA",
            Shape::Curva => "CURVA",
            Shape::Semicurva => "SEMICURVA",
        }
    }

    /// Extra steel (mm) consumed by the bend, added to the developed length.
    pub fn profile_adjustment_mm(self) -> u32 {
        match self {
            Shape::Plana => 20,
            Shape::Semicurva => 10,
            Shape::Curva => 0,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// ClampField - request fields named by validation errors
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampField {
    // codec vocabulary
    Tipo,
    Forma,
    Diametro,
    Ancho,
    Largo,
    Codigo,
    // quote vocabulary
    ClampType,
    ProfileType,
    DollarRate,
    SteelPriceUsd,
    SupplierDiscountPct,
    GeneralIncreasePct,
    WidthMm,
    LengthMm,
}

impl ClampField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            ClampField::Tipo => "tipo",
            ClampField::Forma => "forma",
            ClampField::Diametro => "diametro",
            ClampField::Ancho => "ancho",
            ClampField::Largo => "largo",
            ClampField::Codigo => "codigo",
            ClampField::ClampType => "clamp_type",
            ClampField::ProfileType => "profile_type",
            ClampField::DollarRate => "dollar_rate",
            ClampField::SteelPriceUsd => "steel_price_usd",
            ClampField::SupplierDiscountPct => "supplier_discount_pct",
            ClampField::GeneralIncreasePct => "general_increase_pct",
            ClampField::WidthMm => "width_mm",
            ClampField::LengthMm => "length_mm",
        }
    }

    /// i18n key of the user-facing label.
    pub fn label_key(self) -> String {
        format!("field.{}", self.as_str())
    }
}

impl fmt::Display for ClampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
