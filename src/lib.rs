//! Student records: REST API over a single `students` table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{ApiError, ConfigError, ErrorBody, StoreError};
pub use migration::apply_migrations;
pub use model::{Student, StudentInput};
pub use routes::{app, common_routes, student_routes};
pub use state::AppState;
pub use store::{connect, MemoryStudentStore, PgStudentStore, StudentStore};
