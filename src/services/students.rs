use tracing::{debug, info};

use crate::database::models::{Student, StudentForm};
use crate::database::SchoolStore;
use crate::services::{map_reference_violation, ServiceError, ServiceResult};
use crate::tenant::TenantContext;

const ENTITY: &str = "Student";

pub async fn list(store: &dyn SchoolStore, ctx: &TenantContext) -> ServiceResult<Vec<Student>> {
    Ok(store.list_students(ctx.tenant_id).await?)
}

pub async fn get(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<Student> {
    store
        .find_student(ctx.tenant_id, id)
        .await?
        .ok_or(ServiceError::NotFound(ENTITY))
}

pub async fn create(store: &dyn SchoolStore, ctx: &TenantContext, form: StudentForm) -> ServiceResult<Student> {
    let fields = form.validate()?;
    let student = store.insert_student(ctx.tenant_id, &fields).await?;
    info!(tenant_id = ctx.tenant_id, user = %ctx.user, student_id = student.id, "Created student");
    Ok(student)
}

pub async fn update(
    store: &dyn SchoolStore,
    ctx: &TenantContext,
    id: i64,
    form: StudentForm,
) -> ServiceResult<Student> {
    get(store, ctx, id).await?;
    let fields = form.validate()?;
    let student = store
        .update_student(ctx.tenant_id, id, &fields)
        .await?
        .ok_or(ServiceError::NotFound(ENTITY))?;
    debug!(tenant_id = ctx.tenant_id, user = %ctx.user, student_id = id, "Updated student");
    Ok(student)
}

/// Restricted while the student has enrollments
pub async fn delete(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<()> {
    get(store, ctx, id).await?;

    let enrollments = store.count_student_enrollments(ctx.tenant_id, id).await?;
    if enrollments > 0 {
        return Err(ServiceError::Conflict(format!(
            "Student has {} enrollment(s); delete them first",
            enrollments
        )));
    }

    let removed = store
        .delete_student(ctx.tenant_id, id)
        .await
        .map_err(|e| map_reference_violation(e, "Student still has enrollments"))?;
    if !removed {
        return Err(ServiceError::NotFound(ENTITY));
    }

    info!(tenant_id = ctx.tenant_id, user = %ctx.user, student_id = id, "Deleted student");
    Ok(())
}
