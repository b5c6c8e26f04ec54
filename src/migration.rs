//! Schema setup for the `students` table. Idempotent; run once at startup.

use crate::error::StoreError;
use sqlx::PgPool;

const STUDENTS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    age INTEGER NOT NULL
)
"#;

/// Create the `students` table if it does not exist. No unique constraint on `email`.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(STUDENTS_DDL).execute(pool).await?;
    tracing::debug!("students table ready");
    Ok(())
}
