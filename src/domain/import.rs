// ==========================================
// Abrazaderas - bulk import report types
// ==========================================
// One row result per data row; the summary is derived from the rows.
// ==========================================

use crate::domain::clamp::ParsedClampSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened (dry run: what would happen) to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    Created,
    Updated,
    Error,
}

// ==========================================
// ImportRowResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowResult {
    /// 1-based data row number (header excluded).
    pub row_number: usize,
    pub sku: Option<String>,
    pub action: ImportAction,
    pub success: bool,
    /// Row errors, or parser warnings on successful rows.
    pub errors: Vec<String>,
    pub parsed: Option<ParsedClampSpec>,
}

impl ImportRowResult {
    pub fn failed(row_number: usize, sku: Option<String>, errors: Vec<String>) -> Self {
        Self {
            row_number,
            sku,
            action: ImportAction::Error,
            success: false,
            errors,
            parsed: None,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.parsed
            .as_ref()
            .is_some_and(|p| p.parse_confidence < 100)
    }
}

// ==========================================
// ImportSummary
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
    pub low_confidence: usize,
}

impl ImportSummary {
    pub fn from_rows(rows: &[ImportRowResult]) -> Self {
        let mut summary = ImportSummary {
            total: rows.len(),
            ..Default::default()
        };
        for row in rows {
            match row.action {
                ImportAction::Created => summary.created += 1,
                ImportAction::Updated => summary.updated += 1,
                ImportAction::Error => summary.errors += 1,
            }
            if row.is_low_confidence() {
                summary.low_confidence += 1;
            }
        }
        summary
    }
}

// ==========================================
// ClampImportReport
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClampImportReport {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub rows: Vec<ImportRowResult>,
    pub summary: ImportSummary,
    pub elapsed_ms: u64,
}
