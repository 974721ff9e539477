//! Operation logger
//!
//! Best-effort audit trail of successful calculations. [`OperationLogger::record`]
//! hands the write to a detached tokio task and returns immediately; the
//! request path never awaits it and never sees its failure.

pub mod store;

pub use store::{PgRecordStore, RecordStore};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calculator::Operation;
use crate::db::Database;

/// One completed, successful calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRecord {
    pub user: String,
    pub operation: Operation,
    pub operands: Vec<f64>,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn new(user: impl Into<String>, operation: Operation, operands: Vec<f64>, result: f64) -> Self {
        Self {
            user: user.into(),
            operation,
            operands,
            result,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Default)]
pub struct OperationLogger {
    store: Option<Arc<dyn RecordStore>>,
}

impl OperationLogger {
    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Logger without persistence; records only reach tracing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Connect to PostgreSQL and prepare the table. Any failure leaves
    /// persistence disabled instead of failing startup.
    pub async fn connect(postgres_url: Option<&str>) -> Self {
        let Some(url) = postgres_url else {
            tracing::info!("Calculation log persistence disabled (no postgres_url)");
            return Self::disabled();
        };

        let db = match Database::connect(url).await {
            Ok(db) => db,
            Err(e) => {
                tracing::warn!("Calculation log persistence disabled: {}", e);
                return Self::disabled();
            }
        };

        let store = PgRecordStore::new(db.pool().clone());
        if let Err(e) = store.init_schema().await {
            tracing::warn!("Calculation log persistence disabled: {:?}", e);
            return Self::disabled();
        }

        tracing::info!("Calculation log persistence enabled");
        Self::with_store(Arc::new(store))
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Fire-and-forget: schedule the write and return.
    pub fn record(&self, record: CalculationRecord) {
        tracing::info!(
            user = %record.user,
            operation = record.operation.as_str(),
            result = record.result,
            "{}: {}",
            record.operation.as_str().to_uppercase(),
            record.result
        );

        let Some(store) = self.store.clone() else {
            return;
        };

        tokio::spawn(async move {
            if let Err(e) = store.insert(&record).await {
                tracing::error!(
                    user = %record.user,
                    operation = record.operation.as_str(),
                    "Failed to persist calculation record: {:?}",
                    e
                );
            }
        });
    }
}
