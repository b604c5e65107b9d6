// ==========================================
// Abrazaderas - clamp code codec
// ==========================================
// Code layout: ABL|ABT + [compact diameter][width][length] + C|P|S
// The numeric block has no delimiters; decode ranks every possible split
// ==========================================

mod core;
mod segmentation;


pub use self::core::ClampCodec;
pub use self::segmentation::{
    segment_numeric_core, top_score_is_tied, CatalogHints, SplitCandidate, DEFAULT_LENGTH_RANGE,
    DEFAULT_WIDTH_RANGE,
};
