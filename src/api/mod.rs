// ==========================================
// Abrazaderas - API layer
// ==========================================
// JSON-facing facade used by the command line and embedding callers
// ==========================================

pub mod clamp_api;
pub mod error;

pub use clamp_api::{
    ClampApi, DecodeApiRequest, DiametersApiRequest, DiametersApiResponse, EncodeApiRequest,
    ParseApiRequest,
};
pub use error::{ApiError, ApiResult, ErrorResponse};
