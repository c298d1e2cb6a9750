//! HTTP handlers. Each resource module exposes `list`, `create`, `get`,
//! `update` and `delete`; list responses carry the lookup collections the
//! dashboard pages need to render names for referenced rows.

pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod students;
pub mod system;
pub mod teachers;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};
use serde::Serialize;

use crate::error::ApiError;

/// Body of a successful delete
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: i64,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: i64) -> Self {
        Self { id, deleted: true }
    }
}

/// Unwrap a JSON body, reporting malformed input in the API error format
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}

/// A path id that is not an integer cannot name any row
pub(crate) fn record_id(path: Result<Path<i64>, PathRejection>, entity: &str) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found(format!("{} not found", entity)))
}
