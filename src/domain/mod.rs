// ==========================================
// Abrazaderas - domain layer
// ==========================================
// Value objects, enums and error types shared by the engines.
// No I/O here.
// ==========================================

pub mod clamp;
pub mod error;
pub mod import;
pub mod quote;
pub mod types;

pub use clamp::{
    laminated_allows, ClampSpec, DecodedCode, EncodeRequest, EncodedCode, ParsedClampSpec,
    LAMINATED_ALLOWED_DIAMETERS,
};
pub use error::{ClampError, ClampResult, ErrorKind};
pub use import::{ClampImportReport, ImportAction, ImportRowResult, ImportSummary};
pub use quote::{PriceRow, QuoteInputs, QuoteRequest, QuoteResult};
pub use types::{ClampField, Fabrication, Shape};
