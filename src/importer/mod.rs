// ==========================================
// Abrazaderas - import layer
// ==========================================
// Bulk product import from spreadsheets (.xlsx / .xls / .csv)
// ==========================================

pub mod clamp_importer;
pub mod error;
pub mod file_parser;

pub use clamp_importer::{normalize_header, ClampImporter, ClampImporterImpl};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
