use tracing::{debug, info};

use crate::database::models::{Enrollment, EnrollmentFields, EnrollmentForm};
use crate::database::SchoolStore;
use crate::services::{invalid_reference, ServiceError, ServiceResult};
use crate::tenant::TenantContext;
use crate::validation::{invalid_selection, FieldErrors};

const ENTITY: &str = "Enrollment";
const REFERENCES: &[(&str, &str)] = &[
    ("enrollments_student_fkey", "student_id"),
    ("enrollments_course_fkey", "course_id"),
];

pub async fn list(store: &dyn SchoolStore, ctx: &TenantContext) -> ServiceResult<Vec<Enrollment>> {
    Ok(store.list_enrollments(ctx.tenant_id).await?)
}

pub async fn get(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<Enrollment> {
    store
        .find_enrollment(ctx.tenant_id, id)
        .await?
        .ok_or(ServiceError::NotFound(ENTITY))
}

async fn validate(
    store: &dyn SchoolStore,
    ctx: &TenantContext,
    form: EnrollmentForm,
) -> ServiceResult<EnrollmentFields> {
    let fields = form.validate()?;

    let mut errors = FieldErrors::new();
    if store.find_student(ctx.tenant_id, fields.student_id).await?.is_none() {
        errors.add("student_id", invalid_selection("student_id"));
    }
    if store.find_course(ctx.tenant_id, fields.course_id).await?.is_none() {
        errors.add("course_id", invalid_selection("course_id"));
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    Ok(fields)
}

pub async fn create(
    store: &dyn SchoolStore,
    ctx: &TenantContext,
    form: EnrollmentForm,
) -> ServiceResult<Enrollment> {
    let fields = validate(store, ctx, form).await?;
    let enrollment = store
        .insert_enrollment(ctx.tenant_id, &fields)
        .await
        .map_err(|e| invalid_reference(e, REFERENCES))?;
    info!(tenant_id = ctx.tenant_id, user = %ctx.user, enrollment_id = enrollment.id, "Created enrollment");
    Ok(enrollment)
}

pub async fn update(
    store: &dyn SchoolStore,
    ctx: &TenantContext,
    id: i64,
    form: EnrollmentForm,
) -> ServiceResult<Enrollment> {
    get(store, ctx, id).await?;
    let fields = validate(store, ctx, form).await?;
    let enrollment = store
        .update_enrollment(ctx.tenant_id, id, &fields)
        .await
        .map_err(|e| invalid_reference(e, REFERENCES))?
        .ok_or(ServiceError::NotFound(ENTITY))?;
    debug!(tenant_id = ctx.tenant_id, user = %ctx.user, enrollment_id = id, "Updated enrollment");
    Ok(enrollment)
}

pub async fn delete(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<()> {
    if !store.delete_enrollment(ctx.tenant_id, id).await? {
        return Err(ServiceError::NotFound(ENTITY));
    }
    info!(tenant_id = ctx.tenant_id, user = %ctx.user, enrollment_id = id, "Deleted enrollment");
    Ok(())
}
