//! SciCalc Gateway - scientific calculator over HTTP
//!
//! # Modules
//!
//! - [`calculator`] - Pure arithmetic evaluator (operations, domain checks)
//! - [`auth`] - Credential store, JWT issuance/validation, bearer middleware
//! - [`oplog`] - Fire-and-forget calculation log (PostgreSQL)
//! - [`media`] - Audio file resolution under a fixed media root
//! - [`gateway`] - axum router, handlers, OpenAPI document
//! - [`error`] - Error taxonomy and HTTP mapping
//! - [`config`] / [`logging`] - YAML config, tracing setup (file, stdout, Seq)
//! - [`db`] - PostgreSQL pool

pub mod auth;
pub mod calculator;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod media;
pub mod oplog;

// Convenient re-exports at crate root
pub use calculator::{CalcError, Operation, evaluate};
pub use config::AppConfig;
pub use error::ApiError;
pub use gateway::{build_router, state::AppState};
