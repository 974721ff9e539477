//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - Calculation request/response DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::calculator::Operation;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses (except the OAuth2 token endpoint and audio streams)
/// follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Calculation DTOs
// ============================================================================

/// POST /calculate body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Operation name, e.g. `add`, `divide`, `sqrt`, `integrate`
    #[schema(example = "divide")]
    pub operation: String,
    #[schema(example = json!([10.0, 2.0]))]
    pub operands: Vec<f64>,
}

/// Query form of a calculation: `?x=..&y=..` (`a`/`b` also accepted)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalculateQuery {
    /// First operand
    #[serde(alias = "a")]
    pub x: Option<f64>,
    /// Second operand (binary operations only)
    #[serde(alias = "b")]
    pub y: Option<f64>,
}

impl CalculateQuery {
    /// Operands in positional order. `None` when `y` is given without `x`.
    pub fn operands(&self) -> Option<Vec<f64>> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(vec![x, y]),
            (Some(x), None) => Some(vec![x]),
            (None, None) => Some(Vec::new()),
            (None, Some(_)) => None,
        }
    }
}

/// Calculation result data
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculationData {
    #[schema(value_type = String, example = "divide")]
    pub operation: Operation,
    #[schema(example = json!([10.0, 2.0]))]
    pub operands: Vec<f64>,
    #[schema(example = 5.0)]
    pub result: f64,
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const DOMAIN_ERROR: i32 = 1004;
    pub const INVALID_OPERATION: i32 = 1005;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}
