// ==========================================
// Free-text parser integration tests
// ==========================================

use abrazaderas::engine::normalize_text;
use abrazaderas::{parse_text, Fabrication, Shape};

#[test]
fn test_catalog_style_descriptions() {
    let cases = [
        (
            "ABRAZADERA TREFILADA DE 5/8 X 90 X 250 CURVA",
            Fabrication::Trefilada,
            "5/8",
            90,
            250,
            Shape::Curva,
        ),
        (
            "abrazadera laminada de 1x135x400 s-curva",
            Fabrication::Laminada,
            "1",
            135,
            400,
            Shape::Semicurva,
        ),
        (
            "Abrazadera trefilada de 9/16 X 85 X 270 plana zincada",
            Fabrication::Trefilada,
            "9/16",
            85,
            270,
            Shape::Plana,
        ),
    ];

    for (text, fabrication, diameter, width, length, shape) in cases {
        let parsed = parse_text(text);
        assert_eq!(parsed.fabrication, Some(fabrication), "{text}");
        assert_eq!(parsed.diameter.as_deref(), Some(diameter), "{text}");
        assert_eq!(parsed.width, Some(width), "{text}");
        assert_eq!(parsed.length, Some(length), "{text}");
        assert_eq!(parsed.shape, Some(shape), "{text}");
        assert_eq!(parsed.parse_confidence, 100, "{text}");
    }
}

#[test]
fn test_inch_marks_and_mm_units_around_dimensions() {
    let parsed = parse_text("ABRAZADERA TREFILADA DE 1/2\"X80X220 PLANA");
    assert_eq!(parsed.diameter.as_deref(), Some("1/2"));
    assert_eq!(parsed.width, Some(80));
    assert_eq!(parsed.length, Some(220));
    assert_eq!(parsed.parse_confidence, 100);
    assert!(parsed.parse_warnings.is_empty());

    let parsed = parse_text("ABRAZADERA TREFILADA DE 1/2 80MMX220MM PLANA");
    assert_eq!(parsed.diameter.as_deref(), Some("1/2"));
    assert_eq!(parsed.width, Some(80));
    assert_eq!(parsed.length, Some(220));
    assert_eq!(parsed.parse_confidence, 100);

    let parsed = parse_text("abrazadera laminada de 3/4' x 120 mm x 400 mm curva");
    assert_eq!(parsed.width, Some(120));
    assert_eq!(parsed.length, Some(400));
}

#[test]
fn test_words_with_x_are_not_dimensions() {
    let parsed = parse_text("ABRAZADERA TREFILADA EXTRA DE 1/2 X 80 X 220 PLANA");
    assert_eq!(parsed.width, Some(80));
    assert_eq!(parsed.length, Some(220));
    assert!(normalize_text("extra mmx").contains("EXTRA MMX"));
}

#[test]
fn test_confidence_bounds_on_noise() {
    let noise = [
        "",
        "   ",
        "X X X",
        "DE DE DE",
        "1/2/3 x x x 999999999999999999999",
        "ABRAZADERA DE  X 80",
        "ñandú curva plana semicurva",
        "\u{0}\u{1f600}",
    ];
    for text in noise {
        let parsed = parse_text(text);
        assert!(parsed.parse_confidence <= 100, "{text:?}");
        assert!(parsed.parse_confidence >= 30, "{text:?}");
    }
}

#[test]
fn test_empty_text_reports_every_gap() {
    let parsed = parse_text("");
    assert_eq!(parsed.parse_confidence, 30);
    assert_eq!(parsed.parse_warnings.len(), 4);
    assert!(parsed.to_spec().is_none());
}

#[test]
fn test_normalization_is_stable() {
    let once = normalize_text("abrazadera de 3/4x120x400 s/c");
    assert_eq!(normalize_text(&once), once);
}
