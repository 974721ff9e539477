//! Gateway types module
//!
//! - [`response`]: unified `ApiResponse<T>` envelope, error codes and DTOs

pub mod response;

pub use response::{ApiResponse, CalculateQuery, CalculateRequest, CalculationData, error_codes};
