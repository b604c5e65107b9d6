// ==========================================
// Abrazaderas - core library
// ==========================================
// Clamp (abrazadera) code codec, free-text spec parser, quoter,
// bulk catalog importer and a JSON facade over all of them
// ==========================================

// i18n: Spanish first, English available
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// Modules
// ==========================================

// Domain: value objects, requests/results, errors
pub mod domain;

// Engines: codec, parser, quoter
pub mod engine;

// Quoter configuration
pub mod config;

// Catalog collaborators and request products
pub mod catalog;

// Spreadsheet import
pub mod importer;

// JSON API
pub mod api;

pub mod logging;

pub mod i18n;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    ClampError, ClampField, ClampResult, ClampSpec, DecodedCode, EncodeRequest, EncodedCode,
    ErrorKind, Fabrication, ParsedClampSpec, QuoteRequest, QuoteResult, Shape,
};

pub use engine::{parse_text, CatalogHints, ClampCodec, ClampQuoter, ClampTextParser, DiameterTable};

pub use config::{ConfigManager, QuoterConfig};

pub use api::{ApiError, ClampApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Abrazaderas";
