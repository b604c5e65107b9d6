use super::segmentation::{segment_numeric_core, top_score_is_tied, CatalogHints};
use crate::domain::clamp::{
    ensure_positive, laminated_allows, laminated_not_allowed, DecodedCode, EncodeRequest,
    EncodedCode,
};
use crate::domain::error::{ClampError, ClampResult};
use crate::domain::types::{ClampField, Fabrication, Shape};
use crate::engine::diameter_table::{normalize_key, DiameterTable};
use crate::i18n::{t, t_with_args};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(ABL|ABT)([0-9]+)([CPS])$").expect("invalid clamp code pattern")
});

// ==========================================
// ClampCodec - code <-> attributes
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ClampCodec {
    table: DiameterTable,
}

impl ClampCodec {
    /// Codec bound to a diameter table (use `ClampCodec::default()` for the standard one).
    pub fn new(table: DiameterTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DiameterTable {
        &self.table
    }

    // ==========================================
    // Encode
    // ==========================================

    /// Build a code from attributes.
    ///
    /// # Layout
    /// `prefix + compact diameter + width + length + shape code`
    ///
    /// # Errors
    /// - unknown type / shape alias
    /// - zero width / length
    /// - LAMINADA with a diameter outside 3/4, 1, 7/8
    /// - unmapped diameter in strict mode
    pub fn encode(&self, request: &EncodeRequest) -> ClampResult<EncodedCode> {
        let fabrication = Fabrication::from_alias(&request.fabrication).ok_or_else(|| {
            ClampError::validation(ClampField::Tipo, t("clamp.invalid_type"))
        })?;
        let shape = Shape::from_alias(&request.shape).ok_or_else(|| {
            ClampError::validation(ClampField::Forma, t("clamp.invalid_shape"))
        })?;
        ensure_positive(ClampField::Ancho, request.width)?;
        ensure_positive(ClampField::Largo, request.length)?;

        let diameter = request.diameter.trim();
        if fabrication == Fabrication::Laminada && !laminated_allows(&normalize_key(diameter)) {
            return Err(laminated_not_allowed(diameter));
        }

        let compact = self
            .table
            .to_compact(diameter, request.strict_diameter_mapping)?;

        let code = format!(
            "{}{}{}{}{}",
            fabrication.prefix(),
            compact.compact,
            request.width,
            request.length,
            shape.code()
        );
        debug!(code = %code, requires_mapping = compact.requires_mapping, "clamp code generated");

        Ok(EncodedCode {
            code,
            prefix: fabrication.prefix().to_string(),
            fabrication,
            diameter: diameter.to_string(),
            diameter_compact: compact.compact,
            requires_mapping: compact.requires_mapping,
            width: request.width,
            length: request.length,
            shape_code: shape.code().to_string(),
            shape,
            warnings: compact.warnings,
        })
    }

    /// Code string only.
    pub fn generate_code(&self, request: &EncodeRequest) -> ClampResult<String> {
        self.encode(request).map(|encoded| encoded.code)
    }

    // ==========================================
    // Decode
    // ==========================================

    /// Parse a code back into attributes.
    ///
    /// # Errors
    /// - `Format`: not `(ABL|ABT)` + digits + `C|P|S`
    /// - `Segmentation`: no diameter/width/length split exists
    ///
    /// Ties on the best score and unmapped diameters come back as warnings.
    pub fn decode(&self, code: &str, hints: &CatalogHints) -> ClampResult<DecodedCode> {
        let normalized = normalize_key(code);
        let captures = CODE_PATTERN
            .captures(&normalized)
            .ok_or_else(|| ClampError::Format(t("code.invalid_format")))?;

        let prefix = &captures[1];
        let numeric_core = &captures[2];
        let shape_code = &captures[3];

        let fabrication = Fabrication::from_prefix(prefix)
            .ok_or_else(|| ClampError::Format(t("code.invalid_format")))?;
        let shape = Shape::from_code(shape_code)
            .ok_or_else(|| ClampError::Format(t("code.invalid_format")))?;

        let candidates = segment_numeric_core(numeric_core, hints, &self.table);
        debug!(code = %normalized, candidates = candidates.len(), "numeric core segmented");

        let best = candidates
            .first()
            .ok_or_else(|| ClampError::Segmentation(t("code.segmentation_failed")))?;

        let mut warnings = Vec::new();
        if top_score_is_tied(&candidates) {
            warn!(code = %normalized, score = best.score, "ambiguous clamp code segmentation");
            warnings.push(t("code.ambiguous_parse"));
        }

        let requires_mapping = !self.table.contains_compact(&best.diameter_compact);
        if requires_mapping {
            warnings.push(t_with_args(
                "code.unmapped_compact",
                &[("compact", &best.diameter_compact)],
            ));
        }

        Ok(DecodedCode {
            original_code: code.to_string(),
            normalized_code: normalized.clone(),
            prefix: prefix.to_string(),
            fabrication,
            shape_code: shape_code.to_string(),
            shape,
            diameter_compact: best.diameter_compact.clone(),
            diameter: self.table.to_human(&best.diameter_compact),
            width: best.width,
            length: best.length,
            requires_mapping,
            parse_score: best.score,
            parse_warnings: warnings,
        })
    }
}
