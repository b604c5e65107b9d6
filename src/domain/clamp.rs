// ==========================================
// Abrazaderas - clamp value objects
// ==========================================
// ClampSpec: validated technical attributes
// EncodedCode / DecodedCode: codec outputs (wire vocabulary in Spanish)
// ParsedClampSpec: best-effort free-text extraction
// ==========================================

use crate::domain::error::{ClampError, ClampResult};
use crate::domain::types::{ClampField, Fabrication, Shape};
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};

/// Diameters a LAMINADA clamp can be made in.
pub const LAMINATED_ALLOWED_DIAMETERS: [&str; 3] = ["3/4", "1", "7/8"];

pub fn laminated_allows(diameter: &str) -> bool {
    LAMINATED_ALLOWED_DIAMETERS.contains(&diameter.trim())
}

pub(crate) fn laminated_not_allowed(diameter: &str) -> ClampError {
    let allowed: Vec<String> = LAMINATED_ALLOWED_DIAMETERS
        .iter()
        .map(|d| d.to_string())
        .collect();
    ClampError::laminated_diameter(diameter, &allowed)
}

// ==========================================
// ClampSpec
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClampSpec {
    #[serde(rename = "tipo")]
    fabrication: Fabrication,
    #[serde(rename = "diametro")]
    diameter: String,
    #[serde(rename = "ancho")]
    width_mm: u32,
    #[serde(rename = "largo")]
    length_mm: u32,
    #[serde(rename = "forma")]
    shape: Shape,
    #[serde(rename = "zincada")]
    is_zincated: bool,
}

impl ClampSpec {
    /// Build a spec, enforcing positive dimensions and the LAMINADA diameter subset.
    pub fn new(
        fabrication: Fabrication,
        diameter: &str,
        width_mm: u32,
        length_mm: u32,
        shape: Shape,
        is_zincated: bool,
    ) -> ClampResult<Self> {
        let diameter = diameter.trim();
        if diameter.is_empty() {
            return Err(ClampError::validation(
                ClampField::Diametro,
                crate::i18n::t("clamp.diameter_required"),
            ));
        }
        ensure_positive(ClampField::Ancho, width_mm)?;
        ensure_positive(ClampField::Largo, length_mm)?;

        if fabrication == Fabrication::Laminada && !laminated_allows(diameter) {
            return Err(laminated_not_allowed(diameter));
        }

        Ok(Self {
            fabrication,
            diameter: diameter.to_string(),
            width_mm,
            length_mm,
            shape,
            is_zincated,
        })
    }

    pub fn fabrication(&self) -> Fabrication {
        self.fabrication
    }

    pub fn diameter(&self) -> &str {
        &self.diameter
    }

    pub fn width_mm(&self) -> u32 {
        self.width_mm
    }

    pub fn length_mm(&self) -> u32 {
        self.length_mm
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_zincated(&self) -> bool {
        self.is_zincated
    }
}

pub(crate) fn ensure_positive(field: ClampField, value: u32) -> ClampResult<()> {
    if value == 0 {
        let label = crate::i18n::t(&field.label_key());
        return Err(ClampError::validation(
            field,
            t_with_args("clamp.dimension_not_positive", &[("field", &label)]),
        ));
    }
    Ok(())
}

// ==========================================
// EncodeRequest - raw encode input
// ==========================================
// Type and shape are aliases resolved by the codec (ABT / TREFILADA, P / PLANA ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub fabrication: String,
    pub diameter: String,
    pub width: u32,
    pub length: u32,
    pub shape: String,
    /// Fail instead of warning when the diameter has no table entry.
    pub strict_diameter_mapping: bool,
}

impl EncodeRequest {
    pub fn new(fabrication: &str, diameter: &str, width: u32, length: u32, shape: &str) -> Self {
        Self {
            fabrication: fabrication.to_string(),
            diameter: diameter.to_string(),
            width,
            length,
            shape: shape.to_string(),
            strict_diameter_mapping: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_diameter_mapping = strict;
        self
    }
}

impl From<&ClampSpec> for EncodeRequest {
    fn from(spec: &ClampSpec) -> Self {
        EncodeRequest::new(
            spec.fabrication.as_str(),
            &spec.diameter,
            spec.width_mm,
            spec.length_mm,
            spec.shape.as_str(),
        )
    }
}

// ==========================================
// EncodedCode - encode output with metadata
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedCode {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "prefijo")]
    pub prefix: String,
    #[serde(rename = "tipo")]
    pub fabrication: Fabrication,
    #[serde(rename = "diametro")]
    pub diameter: String,
    #[serde(rename = "diametro_compactado")]
    pub diameter_compact: String,
    #[serde(rename = "diametro_requiere_mapeo")]
    pub requires_mapping: bool,
    #[serde(rename = "ancho")]
    pub width: u32,
    #[serde(rename = "largo")]
    pub length: u32,
    #[serde(rename = "forma_codigo")]
    pub shape_code: String,
    #[serde(rename = "forma")]
    pub shape: Shape,
    pub warnings: Vec<String>,
}

// ==========================================
// DecodedCode - decode output
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCode {
    #[serde(rename = "codigo_original")]
    pub original_code: String,
    #[serde(rename = "codigo_normalizado")]
    pub normalized_code: String,
    #[serde(rename = "prefijo")]
    pub prefix: String,
    #[serde(rename = "tipo")]
    pub fabrication: Fabrication,
    #[serde(rename = "forma_codigo")]
    pub shape_code: String,
    #[serde(rename = "forma")]
    pub shape: Shape,
    #[serde(rename = "diametro_compactado")]
    pub diameter_compact: String,
    #[serde(rename = "diametro")]
    pub diameter: String,
    #[serde(rename = "ancho")]
    pub width: u32,
    #[serde(rename = "largo")]
    pub length: u32,
    #[serde(rename = "diametro_requiere_mapeo")]
    pub requires_mapping: bool,
    pub parse_score: i32,
    pub parse_warnings: Vec<String>,
}

impl DecodedCode {
    /// Promote the decoded attributes to a validated spec.
    pub fn to_spec(&self, is_zincated: bool) -> ClampResult<ClampSpec> {
        ClampSpec::new(
            self.fabrication,
            &self.diameter,
            self.width,
            self.length,
            self.shape,
            is_zincated,
        )
    }

    pub fn is_ambiguous_or_unmapped(&self) -> bool {
        !self.parse_warnings.is_empty()
    }
}

// ==========================================
// ParsedClampSpec - free-text extraction result
// ==========================================
// Any field may be missing; confidence reflects quality and is reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedClampSpec {
    pub fabrication: Option<Fabrication>,
    pub diameter: Option<String>,
    pub width: Option<u32>,
    pub length: Option<u32>,
    pub shape: Option<Shape>,
    pub parse_confidence: i32,
    pub parse_warnings: Vec<String>,
}

impl Default for ParsedClampSpec {
    fn default() -> Self {
        Self {
            fabrication: None,
            diameter: None,
            width: None,
            length: None,
            shape: None,
            parse_confidence: 100,
            parse_warnings: Vec::new(),
        }
    }
}

impl ParsedClampSpec {
    pub fn is_complete(&self) -> bool {
        self.fabrication.is_some()
            && self.diameter.is_some()
            && self.width.is_some()
            && self.length.is_some()
            && self.shape.is_some()
    }

    /// Validated spec when every field was extracted and the combination is legal.
    pub fn to_spec(&self) -> Option<ClampSpec> {
        ClampSpec::new(
            self.fabrication?,
            self.diameter.as_deref()?,
            self.width?,
            self.length?,
            self.shape?,
            false,
        )
        .ok()
    }
}
