use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use serde::Serialize;

use super::{json_body, record_id, Deleted};
use crate::app::AppState;
use crate::database::models::{Student, StudentForm};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::students;
use crate::tenant::TenantContext;

#[derive(Debug, Serialize)]
pub struct StudentPage {
    pub tenant_id: i64,
    pub students: Vec<Student>,
}

/// GET /api/students
pub async fn list(State(state): State<AppState>, tenant: TenantContext) -> ApiResult<StudentPage> {
    let students = students::list(state.store.as_ref(), &tenant).await?;
    Ok(ApiResponse::success(StudentPage {
        tenant_id: tenant.tenant_id,
        students,
    }))
}

/// POST /api/students
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    payload: Result<Json<StudentForm>, JsonRejection>,
) -> ApiResult<Student> {
    let form = json_body(payload)?;
    let student = students::create(state.store.as_ref(), &tenant, form).await?;
    Ok(ApiResponse::created(student))
}

/// GET /api/students/:id
pub async fn get(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Student> {
    let id = record_id(path, "Student")?;
    Ok(ApiResponse::success(students::get(state.store.as_ref(), &tenant, id).await?))
}

/// PUT /api/students/:id
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentForm>, JsonRejection>,
) -> ApiResult<Student> {
    let id = record_id(path, "Student")?;
    let form = json_body(payload)?;
    Ok(ApiResponse::success(
        students::update(state.store.as_ref(), &tenant, id, form).await?,
    ))
}

/// DELETE /api/students/:id
pub async fn delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Deleted> {
    let id = record_id(path, "Student")?;
    students::delete(state.store.as_ref(), &tenant, id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
