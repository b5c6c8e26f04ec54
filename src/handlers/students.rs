//! Student CRUD handlers: create, list, read, update, delete. One store call each.

use crate::error::{ApiError, ErrorBody, StoreError};
use crate::model::{Student, StudentInput};
use crate::state::AppState;
use crate::store::NOT_FOUND_MESSAGE;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// A body that is not JSON at all is rejected the same way as a JSON body with bad fields.
fn decode_body(payload: Result<Json<Value>, JsonRejection>) -> Result<StudentInput, StoreError> {
    let Json(body) = payload.map_err(|rejection| StoreError::Validation(rejection.body_text()))?;
    StudentInput::from_json(body)
}

fn parse_id(id_str: &str) -> Result<i32, StoreError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| StoreError::Validation(format!("invalid id '{}'", id_str)))
}

#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = StudentInput,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Input rejected", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let input = decode_body(payload).map_err(ApiError::rejected)?;
    let student = state.store.create(input).await.map_err(ApiError::rejected)?;
    tracing::debug!(id = student.id, "student created");
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All students", body = [Student]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    let rows = state.store.list().await.map_err(ApiError::listing)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No student with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, ApiError> {
    // An id that does not parse cannot belong to any record.
    let id = parse_id(&id_str)
        .map_err(|_| ApiError::lookup(StoreError::NotFound(NOT_FOUND_MESSAGE.into())))?;
    let student = state.store.get(id).await.map_err(ApiError::lookup)?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Input rejected or no student with this id", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&id_str).map_err(ApiError::rejected)?;
    let input = decode_body(payload).map_err(ApiError::rejected)?;
    let student = state.store.update(id, input).await.map_err(ApiError::rejected)?;
    tracing::debug!(id, "student updated");
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 400, description = "No student with this id", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id_str).map_err(ApiError::rejected)?;
    state.store.delete(id).await.map_err(ApiError::rejected)?;
    tracing::debug!(id, "student deleted");
    Ok(StatusCode::NO_CONTENT)
}
