// ==========================================
// Abrazaderas - bulk clamp importer
// ==========================================
// Flow: read file -> check columns -> per row: validate, parse description,
//       dry run (report) or apply (upsert through the CatalogGateway)
// Columns: descripcion / codigo / precio (case and accent insensitive)
// ==========================================

use crate::catalog::gateway::{CatalogGateway, ClampSpecRecord, ImportedClamp, CLAMP_CATEGORY_NAME};
use crate::domain::import::{ClampImportReport, ImportAction, ImportRowResult, ImportSummary};
use crate::engine::text_parser::ClampTextParser;
use crate::i18n::{t, t_with_args};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{FileParser, RawRow, UniversalFileParser};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub const COLUMN_DESCRIPTION: &str = "descripcion";
pub const COLUMN_SKU: &str = "codigo";
pub const COLUMN_PRICE: &str = "precio";
const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_DESCRIPTION, COLUMN_SKU, COLUMN_PRICE];

// ==========================================
// ClampImporter trait
// ==========================================
#[async_trait]
pub trait ClampImporter: Send + Sync {
    /// Import one spreadsheet.
    ///
    /// # Errors
    /// File-level only (missing file, bad format, missing column). Row
    /// problems end up in the report.
    async fn import_file(&self, file_path: &Path, dry_run: bool) -> ImportResult<ClampImportReport>;

    /// Import several files concurrently; one failing file does not stop the others.
    async fn batch_import(
        &self,
        file_paths: Vec<PathBuf>,
        dry_run: bool,
    ) -> Vec<Result<ClampImportReport, String>>;
}

/// Lowercase, trim and strip Spanish accents: "DESCRIPCIÓN" -> "descripcion".
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

fn normalize_row(row: RawRow) -> HashMap<String, String> {
    row.into_iter()
        .map(|(k, v)| (normalize_header(&k), v))
        .collect()
}

fn cell<'a>(row: &'a HashMap<String, String>, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

/// Price cell: comma accepted as decimal separator.
fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

// ==========================================
// ClampImporterImpl
// ==========================================
pub struct ClampImporterImpl<G>
where
    G: CatalogGateway,
{
    gateway: Arc<G>,
    file_parser: Arc<dyn FileParser>,
    text_parser: ClampTextParser,
}

impl<G> ClampImporterImpl<G>
where
    G: CatalogGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_parser(gateway, Arc::new(UniversalFileParser))
    }

    pub fn with_parser(gateway: Arc<G>, file_parser: Arc<dyn FileParser>) -> Self {
        Self {
            gateway,
            file_parser,
            text_parser: ClampTextParser::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn read_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        let parser = Arc::clone(&self.file_parser);
        let path = file_path.to_path_buf();
        let raw_rows = tokio::task::spawn_blocking(move || parser.parse_to_raw_records(&path))
            .await
            .map_err(|e| ImportError::InternalError(e.to_string()))??;
        Ok(raw_rows.into_iter().map(normalize_row).collect())
    }

    async fn process_row(
        &self,
        row_number: usize,
        row: &HashMap<String, String>,
        dry_run: bool,
    ) -> ImportRowResult {
        let description = cell(row, COLUMN_DESCRIPTION).to_string();
        let sku = cell(row, COLUMN_SKU).to_string();
        let price = parse_price(cell(row, COLUMN_PRICE));

        let mut errors = Vec::new();
        if price.is_none() {
            errors.push(t("import.invalid_price"));
        }
        if sku.is_empty() {
            errors.push(t("import.missing_sku"));
        }
        if description.is_empty() {
            errors.push(t("import.missing_description"));
        }
        let sku_opt = (!sku.is_empty()).then(|| sku.clone());
        let price = match price {
            Some(price) if errors.is_empty() => price,
            _ => {
                warn!(row_number, sku = %sku, errors = ?errors, "import row rejected");
                return ImportRowResult::failed(row_number, sku_opt, errors);
            }
        };

        let parsed = self.text_parser.parse(&description);

        if dry_run {
            let action = match self.gateway.product_exists(&sku).await {
                Ok(true) => ImportAction::Updated,
                Ok(false) => ImportAction::Created,
                Err(e) => {
                    warn!(row_number, sku = %sku, error = %e, "catalog lookup failed");
                    return ImportRowResult::failed(row_number, sku_opt, vec![e.to_string()]);
                }
            };
            let mut notes = Vec::new();
            if parsed.parse_confidence < 100 {
                notes.push(t_with_args(
                    "import.parser_warnings",
                    &[("warnings", &parsed.parse_warnings.join("; "))],
                ));
            }
            return ImportRowResult {
                row_number,
                sku: sku_opt,
                action,
                success: true,
                errors: notes,
                parsed: Some(parsed),
            };
        }

        let clamp = ImportedClamp {
            sku: sku.clone(),
            name: description.clone(),
            description,
            price,
            category: CLAMP_CATEGORY_NAME.to_string(),
            specs: ClampSpecRecord::from(&parsed),
        };
        match self.gateway.upsert_imported_clamp(clamp).await {
            Ok(outcome) => {
                debug!(row_number, sku = %sku, created = outcome.created, "row imported");
                ImportRowResult {
                    row_number,
                    sku: sku_opt,
                    action: if outcome.created {
                        ImportAction::Created
                    } else {
                        ImportAction::Updated
                    },
                    success: true,
                    errors: Vec::new(),
                    parsed: Some(parsed),
                }
            }
            Err(e) => {
                warn!(row_number, sku = %sku, error = %e, "catalog upsert failed");
                ImportRowResult::failed(row_number, sku_opt, vec![e.to_string()])
            }
        }
    }
}

#[async_trait]
impl<G> ClampImporter for ClampImporterImpl<G>
where
    G: CatalogGateway + 'static,
{
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    async fn import_file(&self, file_path: &Path, dry_run: bool) -> ImportResult<ClampImportReport> {
        let start = Instant::now();
        let started_at = Utc::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, dry_run, "clamp import started");

        let rows = self.read_rows(file_path).await.map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "file parse failed");
            e
        })?;

        if let Some(first) = rows.first() {
            if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !first.contains_key(**c)) {
                return Err(ImportError::MissingColumn(missing.to_string()));
            }
        }

        let mut results = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            results.push(self.process_row(idx + 1, row, dry_run).await);
        }

        let summary = ImportSummary::from_rows(&results);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            total = summary.total,
            created = summary.created,
            updated = summary.updated,
            errors = summary.errors,
            low_confidence = summary.low_confidence,
            elapsed_ms,
            "clamp import finished"
        );

        Ok(ClampImportReport {
            batch_id,
            file_name: file_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string()),
            dry_run,
            started_at,
            rows: results,
            summary,
            elapsed_ms,
        })
    }

    async fn batch_import(
        &self,
        file_paths: Vec<PathBuf>,
        dry_run: bool,
    ) -> Vec<Result<ClampImportReport, String>> {
        use futures::future::join_all;

        info!(count = file_paths.len(), "batch import started");
        let tasks = file_paths.iter().map(|path| async move {
            match self.import_file(path, dry_run).await {
                Ok(report) => Ok(report),
                Err(e) => {
                    error!(file = %path.display(), error = %e, "file import failed");
                    Err(format!("{}: {}", path.display(), e))
                }
            }
        });
        join_all(tasks).await
    }
}
