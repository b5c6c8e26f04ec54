//! Store access for the `students` resource. Postgres in production, in-memory for tests and demos.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::{ensure_database_exists, PgStudentStore};

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::model::{Student, StudentInput};
use async_trait::async_trait;
use std::sync::Arc;

/// Message carried by `StoreError::NotFound` for a missing student.
pub const NOT_FOUND_MESSAGE: &str = "Student not found";

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_URL: &str = "memory";

/// One call per operation; no batching, no multi-record transactions.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All records in ascending id order.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    async fn get(&self, id: i32) -> Result<Student, StoreError>;

    async fn create(&self, input: StudentInput) -> Result<Student, StoreError>;

    /// Replaces name, email and age. Fails with `NotFound` when no row has `id`.
    async fn update(&self, id: i32, input: StudentInput) -> Result<Student, StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the underlying connections. Later calls fail with `StoreError::Store`.
    async fn close(&self);
}

/// Build the store selected by `config.url`: `memory` or a PostgreSQL URL.
/// For PostgreSQL the database and the `students` table are created when missing.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn StudentStore>, StoreError> {
    if config.url == MEMORY_URL {
        tracing::info!("using in-memory student store");
        return Ok(Arc::new(MemoryStudentStore::new()));
    }
    ensure_database_exists(&config.url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    crate::migration::apply_migrations(&pool).await?;
    tracing::info!(max_connections = config.max_connections, "connected to postgres");
    Ok(Arc::new(PgStudentStore::new(pool)))
}
