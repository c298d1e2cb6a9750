use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use serde::Serialize;

use super::{json_body, record_id, Deleted};
use crate::app::AppState;
use crate::database::models::{Teacher, TeacherForm};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::teachers;
use crate::tenant::TenantContext;

#[derive(Debug, Serialize)]
pub struct TeacherPage {
    pub tenant_id: i64,
    pub teachers: Vec<Teacher>,
}

/// GET /api/teachers
pub async fn list(State(state): State<AppState>, tenant: TenantContext) -> ApiResult<TeacherPage> {
    let teachers = teachers::list(state.store.as_ref(), &tenant).await?;
    Ok(ApiResponse::success(TeacherPage {
        tenant_id: tenant.tenant_id,
        teachers,
    }))
}

/// POST /api/teachers
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    payload: Result<Json<TeacherForm>, JsonRejection>,
) -> ApiResult<Teacher> {
    let form = json_body(payload)?;
    let teacher = teachers::create(state.store.as_ref(), &tenant, form).await?;
    Ok(ApiResponse::created(teacher))
}

/// GET /api/teachers/:id
pub async fn get(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Teacher> {
    let id = record_id(path, "Teacher")?;
    Ok(ApiResponse::success(teachers::get(state.store.as_ref(), &tenant, id).await?))
}

/// PUT /api/teachers/:id
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TeacherForm>, JsonRejection>,
) -> ApiResult<Teacher> {
    let id = record_id(path, "Teacher")?;
    let form = json_body(payload)?;
    Ok(ApiResponse::success(
        teachers::update(state.store.as_ref(), &tenant, id, form).await?,
    ))
}

/// DELETE /api/teachers/:id
pub async fn delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Deleted> {
    let id = record_id(path, "Teacher")?;
    teachers::delete(state.store.as_ref(), &tenant, id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
