use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use serde::Serialize;

use super::{json_body, record_id, Deleted};
use crate::app::AppState;
use crate::database::models::{Course, CourseForm, Teacher};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{courses, teachers};
use crate::tenant::TenantContext;

/// Courses plus the tenant's teachers, for the teacher picker and name display
#[derive(Debug, Serialize)]
pub struct CoursePage {
    pub tenant_id: i64,
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
}

/// GET /api/courses
pub async fn list(State(state): State<AppState>, tenant: TenantContext) -> ApiResult<CoursePage> {
    let store = state.store.as_ref();
    let courses = courses::list(store, &tenant).await?;
    let teachers = teachers::list(store, &tenant).await?;
    Ok(ApiResponse::success(CoursePage {
        tenant_id: tenant.tenant_id,
        courses,
        teachers,
    }))
}

/// POST /api/courses
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    payload: Result<Json<CourseForm>, JsonRejection>,
) -> ApiResult<Course> {
    let form = json_body(payload)?;
    let course = courses::create(state.store.as_ref(), &tenant, form).await?;
    Ok(ApiResponse::created(course))
}

/// GET /api/courses/:id
pub async fn get(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Course> {
    let id = record_id(path, "Course")?;
    Ok(ApiResponse::success(courses::get(state.store.as_ref(), &tenant, id).await?))
}

/// PUT /api/courses/:id
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CourseForm>, JsonRejection>,
) -> ApiResult<Course> {
    let id = record_id(path, "Course")?;
    let form = json_body(payload)?;
    Ok(ApiResponse::success(
        courses::update(state.store.as_ref(), &tenant, id, form).await?,
    ))
}

/// DELETE /api/courses/:id
pub async fn delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Deleted> {
    let id = record_id(path, "Course")?;
    courses::delete(state.store.as_ref(), &tenant, id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
