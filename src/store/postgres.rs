//! PostgreSQL-backed store over the `students` table.

use super::{StudentStore, NOT_FOUND_MESSAGE};
use crate::error::StoreError;
use crate::model::{Student, StudentInput};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const SELECT_ALL: &str = "SELECT id, name, email, age FROM students ORDER BY id";
const SELECT_ONE: &str = "SELECT id, name, email, age FROM students WHERE id = $1";
const INSERT: &str = "INSERT INTO students (name, email, age) VALUES ($1, $2, $3) RETURNING id, name, email, age";
const UPDATE: &str =
    "UPDATE students SET name = $1, email = $2, age = $3 WHERE id = $4 RETURNING id, name, email, age";
const DELETE: &str = "DELETE FROM students WHERE id = $1";

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        PgStudentStore { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Student>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Student, StoreError> {
        tracing::debug!(sql = %SELECT_ONE, id, "query");
        sqlx::query_as::<_, Student>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(NOT_FOUND_MESSAGE.into()))
    }

    async fn create(&self, input: StudentInput) -> Result<Student, StoreError> {
        tracing::debug!(sql = %INSERT, "query");
        let row = sqlx::query_as::<_, Student>(INSERT)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.age)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, input: StudentInput) -> Result<Student, StoreError> {
        tracing::debug!(sql = %UPDATE, id, "query");
        sqlx::query_as::<_, Student>(UPDATE)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.age)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(NOT_FOUND_MESSAGE.into()))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!(sql = %DELETE, id, "query");
        let result = sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(NOT_FOUND_MESSAGE.into()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::Store(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::Store("DATABASE_URL: no database name".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
