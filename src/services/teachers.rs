use tracing::{debug, info};

use crate::database::models::{Teacher, TeacherForm};
use crate::database::SchoolStore;
use crate::services::{map_reference_violation, ServiceError, ServiceResult};
use crate::tenant::TenantContext;

const ENTITY: &str = "Teacher";

pub async fn list(store: &dyn SchoolStore, ctx: &TenantContext) -> ServiceResult<Vec<Teacher>> {
    Ok(store.list_teachers(ctx.tenant_id).await?)
}

pub async fn get(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<Teacher> {
    store
        .find_teacher(ctx.tenant_id, id)
        .await?
        .ok_or(ServiceError::NotFound(ENTITY))
}

pub async fn create(store: &dyn SchoolStore, ctx: &TenantContext, form: TeacherForm) -> ServiceResult<Teacher> {
    let fields = form.validate()?;
    let teacher = store.insert_teacher(ctx.tenant_id, &fields).await?;
    info!(tenant_id = ctx.tenant_id, user = %ctx.user, teacher_id = teacher.id, "Created teacher");
    Ok(teacher)
}

pub async fn update(
    store: &dyn SchoolStore,
    ctx: &TenantContext,
    id: i64,
    form: TeacherForm,
) -> ServiceResult<Teacher> {
    get(store, ctx, id).await?;
    let fields = form.validate()?;
    let teacher = store
        .update_teacher(ctx.tenant_id, id, &fields)
        .await?
        .ok_or(ServiceError::NotFound(ENTITY))?;
    debug!(tenant_id = ctx.tenant_id, user = %ctx.user, teacher_id = id, "Updated teacher");
    Ok(teacher)
}

/// Restricted while the teacher still has courses
pub async fn delete(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<()> {
    get(store, ctx, id).await?;

    let courses = store.count_teacher_courses(ctx.tenant_id, id).await?;
    if courses > 0 {
        return Err(ServiceError::Conflict(format!(
            "Teacher is assigned to {} course(s); reassign or delete them first",
            courses
        )));
    }

    let removed = store
        .delete_teacher(ctx.tenant_id, id)
        .await
        .map_err(|e| map_reference_violation(e, "Teacher is still assigned to courses"))?;
    if !removed {
        return Err(ServiceError::NotFound(ENTITY));
    }

    info!(tenant_id = ctx.tenant_id, user = %ctx.user, teacher_id = id, "Deleted teacher");
    Ok(())
}
