// ==========================================
// Abrazaderas - free-text spec parser
// ==========================================
// Extracts fabrication / diameter / width / length / shape from loosely
// written product descriptions ("ABRAZADERA TREFILADA DE 1/2 X 80 X 220 PLANA").
// Never fails: missing or conflicting signals lower the confidence and
// add a warning.
// ==========================================

use crate::domain::clamp::ParsedClampSpec;
use crate::domain::types::{Fabrication, Shape};
use crate::i18n::t;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Literal synonyms, applied in order before the standalone SC word.
const SYNONYMS: [(&str, &str); 4] = [
    ("S/CURVA", "SEMICURVA"),
    ("S-CURVA", "SEMICURVA"),
    ("S/C", "SEMICURVA"),
    ("CURV.", "CURVA"),
];

const PENALTY_FABRICATION: i32 = 20;
const PENALTY_DIAMETER: i32 = 20;
const PENALTY_DIMENSIONS: i32 = 20;
const PENALTY_LENGTH: i32 = 10;
const PENALTY_SHAPE: i32 = 10;

static SC_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSC\b").expect("invalid SC pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));
static DIMENSION_X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*X\s*").expect("invalid dimension separator pattern"));
static DIAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bDE\s+(\d+(?:/\d+)?)").expect("invalid diameter pattern"));
static DIMENSION_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" X (\d+)").expect("invalid dimension pattern"));
static MM_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*MM(X|[^A-Z]|$)").expect("invalid unit pattern"));

/// Uppercase, apply synonyms, drop `MM` units, collapse whitespace and space
/// out dimension `X`s.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = text.trim().to_uppercase();
    for (from, to) in SYNONYMS {
        normalized = normalized.replace(from, to);
    }
    normalized = SC_WORD.replace_all(&normalized, "SEMICURVA").into_owned();
    normalized = MM_UNIT.replace_all(&normalized, "${1}${2}").into_owned();
    normalized = WHITESPACE.replace_all(&normalized, " ").into_owned();
    space_dimension_separators(normalized.trim())
}

/// Force " X " only where the X sits between a measure and a digit. A measure
/// ends in a digit or `/`, optionally followed by inch marks (`1/2"`).
fn space_dimension_separators(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for m in DIMENSION_X.find_iter(text) {
        let before = text[..m.start()]
            .trim_end_matches(['"', '\''])
            .chars()
            .next_back();
        let after = text[m.end()..].chars().next();
        let is_dimension = matches!(before, Some(c) if c.is_ascii_digit() || c == '/')
            && matches!(after, Some(c) if c.is_ascii_digit());
        if is_dimension {
            out.push_str(&text[last..m.start()]);
            out.push_str(" X ");
            last = m.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

// ==========================================
// ClampTextParser
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampTextParser;

impl ClampTextParser {
    pub fn new() -> Self {
        Self
    }

    /// Best-effort extraction. Confidence starts at 100 and only goes down.
    pub fn parse(&self, text: &str) -> ParsedClampSpec {
        let normalized = normalize_text(text);
        let mut result = ParsedClampSpec::default();

        // fabrication
        let has_trefilada = normalized.contains("TREFILADA");
        let has_laminada = normalized.contains("LAMINADA");
        match (has_trefilada, has_laminada) {
            (true, true) => {
                result.parse_warnings.push(t("parser.fabrication_conflict"));
                result.parse_confidence -= PENALTY_FABRICATION;
            }
            (true, false) => result.fabrication = Some(Fabrication::Trefilada),
            (false, true) => result.fabrication = Some(Fabrication::Laminada),
            (false, false) => {
                result.parse_warnings.push(t("parser.fabrication_missing"));
                result.parse_confidence -= PENALTY_FABRICATION;
            }
        }

        // diameter
        match DIAMETER.captures(&normalized) {
            Some(caps) => result.diameter = Some(caps[1].to_string()),
            None => {
                result.parse_warnings.push(t("parser.diameter_missing"));
                result.parse_confidence -= PENALTY_DIAMETER;
            }
        }

        // width / length
        let mut dimensions: Vec<u32> = leading_width(&normalized).into_iter().collect();
        dimensions.extend(
            DIMENSION_VALUE
                .captures_iter(&normalized)
                .filter_map(|caps| caps[1].parse::<u32>().ok()),
        );
        match dimensions.as_slice() {
            [] => {
                result.parse_warnings.push(t("parser.dimensions_missing"));
                result.parse_confidence -= PENALTY_DIMENSIONS;
            }
            [width] => {
                result.width = Some(*width);
                result.parse_warnings.push(t("parser.length_missing"));
                result.parse_confidence -= PENALTY_LENGTH;
            }
            [width, length, ..] => {
                result.width = Some(*width);
                result.length = Some(*length);
            }
        }

        // shape
        result.shape = if normalized.contains("SEMICURVA") {
            Some(Shape::Semicurva)
        } else if normalized.contains("CURVA") {
            Some(Shape::Curva)
        } else if normalized.contains("PLANA") {
            Some(Shape::Plana)
        } else {
            None
        };
        if result.shape.is_none() {
            result.parse_warnings.push(t("parser.shape_missing"));
            result.parse_confidence -= PENALTY_SHAPE;
        }

        debug!(
            text = %normalized,
            confidence = result.parse_confidence,
            warnings = result.parse_warnings.len(),
            "clamp description parsed"
        );
        result
    }
}

/// Width written before the first ` X ` ("DE 1/2 80 X 220"). A number right
/// after `DE` is the diameter, not a width.
fn leading_width(normalized: &str) -> Option<u32> {
    let first = DIMENSION_VALUE.find(normalized)?;
    let prefix = &normalized[..first.start()];
    let (head, token) = match prefix.rsplit_once(' ') {
        Some((head, token)) => (head, token),
        None => ("", prefix),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if head == "DE" || head.ends_with(" DE") {
        return None;
    }
    token.parse().ok()
}

/// Shorthand for `ClampTextParser::new().parse(text)`.
pub fn parse_text(text: &str) -> ParsedClampSpec {
    ClampTextParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_synonyms_and_separators() {
        assert_eq!(
            normalize_text("  abrazadera   de 3/4x120X400 s/curva "),
            "ABRAZADERA DE 3/4 X 120 X 400 SEMICURVA"
        );
        assert_eq!(normalize_text("de 1 x 90 curv."), "DE 1 X 90 CURVA");
        assert_eq!(normalize_text("tipo sc"), "TIPO SEMICURVA");
        assert_eq!(normalize_text("S-CURVA"), "SEMICURVA");
    }

    #[test]
    fn test_normalize_keeps_words_with_x() {
        assert_eq!(normalize_text("extra x fuerte"), "EXTRA X FUERTE");
        assert_eq!(normalize_text("TEXTO"), "TEXTO");
    }

    #[test]
    fn test_normalize_inch_marks_and_units() {
        assert_eq!(normalize_text("DE 1/2\"X80X220"), "DE 1/2\" X 80 X 220");
        assert_eq!(normalize_text("de 1/2 80mmX220 mm plana"), "DE 1/2 80 X 220 PLANA");
        assert_eq!(normalize_text("EXTRA MMX"), "EXTRA MMX");
    }

    #[test]
    fn test_parse_complete_description() {
        let parsed = parse_text("Abrazadera trefilada zincada de 1/2 x 80 x 220 plana");
        assert_eq!(parsed.fabrication, Some(Fabrication::Trefilada));
        assert_eq!(parsed.diameter.as_deref(), Some("1/2"));
        assert_eq!(parsed.width, Some(80));
        assert_eq!(parsed.length, Some(220));
        assert_eq!(parsed.shape, Some(Shape::Plana));
        assert_eq!(parsed.parse_confidence, 100);
        assert!(parsed.parse_warnings.is_empty());
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_parse_compact_dimensions() {
        let parsed = parse_text("ABRAZADERA LAMINADA DE 3/4X120X400 S/CURVA");
        assert_eq!(parsed.fabrication, Some(Fabrication::Laminada));
        assert_eq!(parsed.diameter.as_deref(), Some("3/4"));
        assert_eq!(parsed.width, Some(120));
        assert_eq!(parsed.length, Some(400));
        assert_eq!(parsed.shape, Some(Shape::Semicurva));
        assert!(parsed.to_spec().is_some());
    }

    #[test]
    fn test_parse_partial_description() {
        let parsed = parse_text("abrazadera de 7/8 x 100 sc");
        assert_eq!(parsed.fabrication, None);
        assert_eq!(parsed.width, Some(100));
        assert_eq!(parsed.length, None);
        assert_eq!(parsed.shape, Some(Shape::Semicurva));
        assert_eq!(parsed.parse_confidence, 70);
        assert_eq!(parsed.parse_warnings.len(), 2);
    }

    #[test]
    fn test_parse_conflicting_fabrication() {
        let parsed = parse_text("TREFILADA O LAMINADA DE 1 X 100 X 300 CURV.");
        assert_eq!(parsed.fabrication, None);
        assert_eq!(parsed.shape, Some(Shape::Curva));
        assert_eq!(parsed.parse_confidence, 80);
        assert_eq!(parsed.parse_warnings.len(), 1);
    }

    #[test]
    fn test_parse_shape_priority() {
        assert_eq!(
            parse_text("SEMICURVA CURVA PLANA").shape,
            Some(Shape::Semicurva)
        );
        assert_eq!(parse_text("CURVA PLANA").shape, Some(Shape::Curva));
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        let parsed = parse_text("");
        assert_eq!(parsed.parse_confidence, 30);
        assert_eq!(parsed.parse_warnings.len(), 4);

        for text in ["x", "X X X", "DE DE DE", "9999999999999 X 99999999999999", "ñandú"] {
            let parsed = parse_text(text);
            assert!(parsed.parse_confidence <= 100);
            assert!(parsed.parse_confidence >= 30);
        }
    }
}
