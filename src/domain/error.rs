// ==========================================
// Abrazaderas - core error type
// ==========================================
// Validation / Format / Segmentation are fatal to a single call.
// Advisory warnings never go through this type; they travel inside results.
// ==========================================

use crate::domain::types::ClampField;
use crate::i18n::t_with_args;
use thiserror::Error;

/// Core error for the codec, quoter and spec value objects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClampError {
    /// Malformed or out-of-domain input, tied to one request field.
    #[error("{message}")]
    Validation { field: ClampField, message: String },

    /// LAMINADA clamps only exist for a restricted set of diameters.
    #[error("{message}")]
    LaminatedDiameterNotAllowed { diameter: String, message: String },

    /// Code string does not match `(ABL|ABT)\d+(C|P|S)`.
    #[error("{0}")]
    Format(String),

    /// Digit run could not be split into diameter/width/length.
    #[error("{0}")]
    Segmentation(String),
}

/// Coarse error category, used by callers that render errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Format,
    Segmentation,
}

impl ClampError {
    pub fn validation(field: ClampField, message: impl Into<String>) -> Self {
        ClampError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn laminated_diameter(diameter: &str, allowed: &[String]) -> Self {
        let message = t_with_args(
            "clamp.laminated_diameter",
            &[("diameter", diameter), ("allowed", &allowed.join(", "))],
        );
        ClampError::LaminatedDiameterNotAllowed {
            diameter: diameter.to_string(),
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClampError::Validation { .. } | ClampError::LaminatedDiameterNotAllowed { .. } => {
                ErrorKind::Validation
            }
            ClampError::Format(_) => ErrorKind::Format,
            ClampError::Segmentation(_) => ErrorKind::Segmentation,
        }
    }

    /// Offending field, when the error can be attributed to one.
    pub fn field(&self) -> Option<ClampField> {
        match self {
            ClampError::Validation { field, .. } => Some(*field),
            ClampError::LaminatedDiameterNotAllowed { .. } => Some(ClampField::Diametro),
            ClampError::Format(_) | ClampError::Segmentation(_) => Some(ClampField::Codigo),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// Result alias
pub type ClampResult<T> = Result<T, ClampError>;
