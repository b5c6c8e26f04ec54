//! HTTP client for the students API. Errors carry the API's `{error}` message verbatim.

use crate::view::StudentPayload;
use reqwest::{Client, Response};
use student_records::{ErrorBody, Student};
use thiserror::Error;

pub const FETCH_FAILED: &str = "Failed to fetch students";
pub const SAVE_FAILED: &str = "Failed to save student";
pub const DELETE_FAILED: &str = "Failed to delete student";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The API could not be reached or answered with something unreadable.
    #[error("{0}")]
    Transport(String),
}

#[derive(Clone)]
pub struct StudentsClient {
    http: Client,
    endpoint: String,
}

impl StudentsClient {
    /// `endpoint` is the collection URL, e.g. `http://localhost:3000/students`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        StudentsClient {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    pub async fn list(&self) -> Result<Vec<Student>, ClientError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| transport(FETCH_FAILED, e))?;
        let response = check(response, FETCH_FAILED).await?;
        response.json().await.map_err(|e| transport(FETCH_FAILED, e))
    }

    pub async fn create(&self, payload: &StudentPayload) -> Result<Student, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| transport(SAVE_FAILED, e))?;
        let response = check(response, SAVE_FAILED).await?;
        response.json().await.map_err(|e| transport(SAVE_FAILED, e))
    }

    pub async fn update(&self, id: i32, payload: &StudentPayload) -> Result<Student, ClientError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(payload)
            .send()
            .await
            .map_err(|e| transport(SAVE_FAILED, e))?;
        let response = check(response, SAVE_FAILED).await?;
        response.json().await.map_err(|e| transport(SAVE_FAILED, e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|e| transport(DELETE_FAILED, e))?;
        check(response, DELETE_FAILED).await?;
        Ok(())
    }
}

fn transport(fallback: &str, e: reqwest::Error) -> ClientError {
    tracing::warn!(error = %e, "students API call failed");
    ClientError::Transport(format!("{}: {}", fallback, e))
}

/// Pass successful responses through; turn the rest into `ClientError::Api`.
/// The message is the body's `error` field, or `fallback` when there is none.
async fn check(response: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
