//! Record stores
//!
//! [`RecordStore`] abstracts the relational table so the logger can be
//! exercised without a database.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::CalculationRecord;

/// Append-only sink for calculation records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist one record. Called once per successful calculation.
    async fn insert(&self, record: &CalculationRecord) -> Result<()>;
}

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS calculation_logs (
    id          BIGSERIAL PRIMARY KEY,
    username    TEXT NOT NULL,
    operation   VARCHAR(50) NOT NULL,
    operands    DOUBLE PRECISION[] NOT NULL,
    result      DOUBLE PRECISION NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// PostgreSQL-backed record store
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the log table if missing. Additive only, never alters.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .context("Failed to create calculation_logs table")?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: &CalculationRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calculation_logs (username, operation, operands, result, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&record.user)
        .bind(record.operation.as_str())
        .bind(&record.operands)
        .bind(record.result)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .context("Failed to insert calculation record")?;
        Ok(())
    }
}
