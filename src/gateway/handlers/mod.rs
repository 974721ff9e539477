//! HTTP handlers
//!
//! - [`calc`]: `POST /calculate`, `GET /calculate/{operation}`
//! - [`media`]: `GET /music/{track_name}`, `GET /music?track=`
//! - [`health`]: `GET /health`

pub mod calc;
pub mod health;
pub mod media;

pub use calc::{calculate, calculate_query};
pub use health::{HealthResponse, health_check};
pub use media::{stream_track, stream_track_query};
