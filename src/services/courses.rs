use tracing::{debug, info};

use crate::database::models::{Course, CourseFields, CourseForm};
use crate::database::SchoolStore;
use crate::services::{invalid_reference, map_reference_violation, ServiceError, ServiceResult};
use crate::tenant::TenantContext;
use crate::validation::{invalid_selection, FieldErrors};

const ENTITY: &str = "Course";
const REFERENCES: &[(&str, &str)] = &[("courses_teacher_fkey", "teacher_id")];

pub async fn list(store: &dyn SchoolStore, ctx: &TenantContext) -> ServiceResult<Vec<Course>> {
    Ok(store.list_courses(ctx.tenant_id).await?)
}

pub async fn get(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<Course> {
    store
        .find_course(ctx.tenant_id, id)
        .await?
        .ok_or(ServiceError::NotFound(ENTITY))
}

/// Shape-check the form, then require the teacher to belong to the tenant
async fn validate(store: &dyn SchoolStore, ctx: &TenantContext, form: CourseForm) -> ServiceResult<CourseFields> {
    let fields = form.validate()?;

    if store.find_teacher(ctx.tenant_id, fields.teacher_id).await?.is_none() {
        let mut errors = FieldErrors::new();
        errors.add("teacher_id", invalid_selection("teacher_id"));
        return Err(errors.into());
    }

    Ok(fields)
}

pub async fn create(store: &dyn SchoolStore, ctx: &TenantContext, form: CourseForm) -> ServiceResult<Course> {
    let fields = validate(store, ctx, form).await?;
    let course = store
        .insert_course(ctx.tenant_id, &fields)
        .await
        .map_err(|e| invalid_reference(e, REFERENCES))?;
    info!(tenant_id = ctx.tenant_id, user = %ctx.user, course_id = course.id, "Created course");
    Ok(course)
}

pub async fn update(
    store: &dyn SchoolStore,
    ctx: &TenantContext,
    id: i64,
    form: CourseForm,
) -> ServiceResult<Course> {
    get(store, ctx, id).await?;
    let fields = validate(store, ctx, form).await?;
    let course = store
        .update_course(ctx.tenant_id, id, &fields)
        .await
        .map_err(|e| invalid_reference(e, REFERENCES))?
        .ok_or(ServiceError::NotFound(ENTITY))?;
    debug!(tenant_id = ctx.tenant_id, user = %ctx.user, course_id = id, "Updated course");
    Ok(course)
}

/// Restricted while students are enrolled in the course
pub async fn delete(store: &dyn SchoolStore, ctx: &TenantContext, id: i64) -> ServiceResult<()> {
    get(store, ctx, id).await?;

    let enrollments = store.count_course_enrollments(ctx.tenant_id, id).await?;
    if enrollments > 0 {
        return Err(ServiceError::Conflict(format!(
            "Course has {} enrollment(s); delete them first",
            enrollments
        )));
    }

    let removed = store
        .delete_course(ctx.tenant_id, id)
        .await
        .map_err(|e| map_reference_violation(e, "Course still has enrollments"))?;
    if !removed {
        return Err(ServiceError::NotFound(ENTITY));
    }

    info!(tenant_id = ctx.tenant_id, user = %ctx.user, course_id = id, "Deleted course");
    Ok(())
}
