// ==========================================
// Abrazaderas - engine layer
// ==========================================
// diameter_table: fractional diameter <-> compact digits
// clamp_code: code encode / heuristic decode
// text_parser: free-text description -> partial spec
// quoter: deterministic price calculation
// ==========================================

pub mod clamp_code;
pub mod diameter_table;
pub(crate) mod field_parse;
pub mod quoter;
pub mod text_parser;

pub use clamp_code::{segment_numeric_core, CatalogHints, ClampCodec, SplitCandidate};
pub use diameter_table::{CompactDiameter, DiameterTable, STANDARD_DIAMETERS};
pub use quoter::{build_description, ClampQuoter};
pub use text_parser::{normalize_text, parse_text, ClampTextParser};
