use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use serde::Serialize;

use super::{json_body, record_id, Deleted};
use crate::app::AppState;
use crate::database::models::{Course, Enrollment, EnrollmentForm, Student};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{courses, enrollments, students};
use crate::tenant::TenantContext;

/// Enrollments plus the tenant's courses and students
#[derive(Debug, Serialize)]
pub struct EnrollmentPage {
    pub tenant_id: i64,
    pub enrollments: Vec<Enrollment>,
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
}

/// GET /api/enrollments
pub async fn list(State(state): State<AppState>, tenant: TenantContext) -> ApiResult<EnrollmentPage> {
    let store = state.store.as_ref();
    let enrollments = enrollments::list(store, &tenant).await?;
    let courses = courses::list(store, &tenant).await?;
    let students = students::list(store, &tenant).await?;
    Ok(ApiResponse::success(EnrollmentPage {
        tenant_id: tenant.tenant_id,
        enrollments,
        courses,
        students,
    }))
}

/// POST /api/enrollments
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    payload: Result<Json<EnrollmentForm>, JsonRejection>,
) -> ApiResult<Enrollment> {
    let form = json_body(payload)?;
    let enrollment = enrollments::create(state.store.as_ref(), &tenant, form).await?;
    Ok(ApiResponse::created(enrollment))
}

/// GET /api/enrollments/:id
pub async fn get(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Enrollment> {
    let id = record_id(path, "Enrollment")?;
    Ok(ApiResponse::success(enrollments::get(state.store.as_ref(), &tenant, id).await?))
}

/// PUT /api/enrollments/:id
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EnrollmentForm>, JsonRejection>,
) -> ApiResult<Enrollment> {
    let id = record_id(path, "Enrollment")?;
    let form = json_body(payload)?;
    Ok(ApiResponse::success(
        enrollments::update(state.store.as_ref(), &tenant, id, form).await?,
    ))
}

/// DELETE /api/enrollments/:id
pub async fn delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Deleted> {
    let id = record_id(path, "Enrollment")?;
    enrollments::delete(state.store.as_ref(), &tenant, id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
