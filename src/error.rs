//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Failure reported by the store access layer. Display is the raw message handed to clients.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Input the store refused: missing field, wrong type, constraint violation.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Anything else, including the store being unreachable.
    #[error("{0}")]
    Store(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound(crate::store::NOT_FOUND_MESSAGE.into()),
            sqlx::Error::Database(db) => {
                if is_rejected_input(db.code().as_deref()) {
                    StoreError::Validation(db.message().to_string())
                } else {
                    StoreError::Store(db.to_string())
                }
            }
            other => StoreError::Store(other.to_string()),
        }
    }
}

/// SQLSTATE class 22 is data exception, class 23 integrity constraint violation.
fn is_rejected_input(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.starts_with("22") || code.starts_with("23"))
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Error as returned from a handler: a status chosen per operation plus the raw store message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    /// Mapping for create, update and delete: every failure is a client error.
    pub fn rejected(e: StoreError) -> Self {
        match e {
            StoreError::Validation(m) | StoreError::NotFound(m) | StoreError::Store(m) => {
                ApiError::new(StatusCode::BAD_REQUEST, m)
            }
        }
    }

    /// Mapping for list: every failure is a server error.
    pub fn listing(e: StoreError) -> Self {
        match e {
            StoreError::Validation(m) | StoreError::NotFound(m) | StoreError::Store(m) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        }
    }

    /// Mapping for get-by-id: not found has its own status, the rest is a server error.
    pub fn lookup(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(m) => ApiError::new(StatusCode::NOT_FOUND, m),
            StoreError::Validation(m) | StoreError::Store(m) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, error = %self.message, "request failed");
        }
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
