// ==========================================
// Abrazaderas - API error type
// ==========================================
// Converts core / import / config errors into one type with a stable
// machine code and an optional offending field.
// ==========================================

use crate::config::ConfigError;
use crate::domain::error::ClampError;
use crate::domain::types::ClampField;
use crate::importer::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Request errors
    // ==========================================
    /// A request field failed validation.
    #[error("{message}")]
    InvalidField { field: ClampField, message: String },

    /// Code string is not a clamp code.
    #[error("{0}")]
    InvalidCode(String),

    /// Clamp code whose digits cannot be split.
    #[error("{0}")]
    SegmentationFailed(String),

    /// Malformed body or unknown command.
    #[error("{0}")]
    InvalidInput(String),

    // ==========================================
    // Infrastructure errors
    // ==========================================
    #[error("{0}")]
    ImportError(String),

    #[error("{0}")]
    ConfigError(String),

    #[error("{0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Stable machine code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidField { .. } => "INVALID_FIELD",
            ApiError::InvalidCode(_) => "INVALID_CODE",
            ApiError::SegmentationFailed(_) => "SEGMENTATION_FAILED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "UNKNOWN_ERROR",
        }
    }

    pub fn field(&self) -> Option<ClampField> {
        match self {
            ApiError::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            field: self.field().map(|f| f.as_str().to_string()),
            message: self.to_string(),
        }
    }
}

/// Serialized error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

// ==========================================
// Conversions
// ==========================================

impl From<ClampError> for ApiError {
    fn from(err: ClampError) -> Self {
        match err {
            ClampError::Validation { field, message } => ApiError::InvalidField { field, message },
            ClampError::LaminatedDiameterNotAllowed { message, .. } => ApiError::InvalidField {
                field: ClampField::Diametro,
                message,
            },
            ClampError::Format(message) => ApiError::InvalidCode(message),
            ClampError::Segmentation(message) => ApiError::SegmentationFailed(message),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_error_mapping() {
        let err: ApiError = ClampError::validation(ClampField::Ancho, "bad width").into();
        assert_eq!(err.code(), "INVALID_FIELD");
        assert_eq!(err.field(), Some(ClampField::Ancho));

        let err: ApiError = ClampError::Format("bad".into()).into();
        assert_eq!(err.code(), "INVALID_CODE");
        assert_eq!(err.field(), None);

        let err: ApiError = ClampError::Segmentation("split".into()).into();
        assert_eq!(err.code(), "SEGMENTATION_FAILED");
    }

    #[test]
    fn test_laminated_maps_to_diameter_field() {
        let err: ApiError =
            ClampError::laminated_diameter("1/2", &["3/4".to_string(), "1".to_string()]).into();
        assert_eq!(err.field(), Some(ClampField::Diametro));
    }

    #[test]
    fn test_response_omits_missing_field() {
        let json = serde_json::to_value(ApiError::InvalidInput("x".into()).to_response()).unwrap();
        assert_eq!(json["code"], "INVALID_INPUT");
        assert!(json.get("field").is_none());
        assert_eq!(json["message"], "x");
    }
}
