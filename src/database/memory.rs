use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::database::error::StoreError;
use crate::database::models::{
    Course, CourseFields, DashboardCounts, Enrollment, EnrollmentFields, Student, StudentFields,
    Teacher, TeacherFields, TenantOwned, Tenant,
};
use crate::database::store::SchoolStore;

/// In-process `SchoolStore` for local runs and tests.
///
/// Mirrors the Postgres layout: ids are per-table sequences starting at 1,
/// lists come back in insertion order, and references must point at rows of
/// the same tenant.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    tenants: Vec<Tenant>,
    teachers: Vec<Teacher>,
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    next_tenant: i64,
    next_teacher: i64,
    next_student: i64,
    next_course: i64,
    next_enrollment: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn scoped<T: TenantOwned + Clone>(rows: &[T], tenant_id: i64) -> Vec<T> {
    rows.iter().filter(|r| r.owned_by(tenant_id)).cloned().collect()
}

fn find_scoped<T: TenantOwned + Clone>(rows: &[T], tenant_id: i64, id: i64) -> Option<T> {
    rows.iter().find(|r| r.id() == id && r.owned_by(tenant_id)).cloned()
}

fn find_scoped_mut<T: TenantOwned>(rows: &mut [T], tenant_id: i64, id: i64) -> Option<&mut T> {
    rows.iter_mut().find(|r| r.id() == id && r.owned_by(tenant_id))
}

fn remove_scoped<T: TenantOwned>(rows: &mut Vec<T>, tenant_id: i64, id: i64) -> bool {
    let before = rows.len();
    rows.retain(|r| !(r.id() == id && r.owned_by(tenant_id)));
    rows.len() != before
}

fn exists_scoped<T: TenantOwned>(rows: &[T], tenant_id: i64, id: i64) -> bool {
    rows.iter().any(|r| r.id() == id && r.owned_by(tenant_id))
}

fn fk_violation(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation(constraint.to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with tenants under fixed ids. A repeated id keeps
    /// its first name.
    pub fn with_tenants<I, S>(tenants: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let mut tables = Tables::default();
        let now = Utc::now();
        for (id, name) in tenants {
            let name: String = name.into();
            if tables.tenants.iter().any(|t| t.id == id) {
                warn!("Ignoring duplicate tenant seed {} ({})", id, name);
                continue;
            }
            tables.tenants.push(Tenant {
                id,
                name,
                created_at: now,
                updated_at: now,
            });
            tables.next_tenant = tables.next_tenant.max(id);
        }
        tables.tenants.sort_by_key(|t| t.id);
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Tables {
    fn check_course_refs(&self, tenant_id: i64, fields: &CourseFields) -> Result<(), StoreError> {
        if !exists_scoped(&self.teachers, tenant_id, fields.teacher_id) {
            return Err(fk_violation("courses_teacher_fkey"));
        }
        Ok(())
    }

    fn check_enrollment_refs(&self, tenant_id: i64, fields: &EnrollmentFields) -> Result<(), StoreError> {
        if !exists_scoped(&self.students, tenant_id, fields.student_id) {
            return Err(fk_violation("enrollments_student_fkey"));
        }
        if !exists_scoped(&self.courses, tenant_id, fields.course_id) {
            return Err(fk_violation("enrollments_course_fkey"));
        }
        Ok(())
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.tenants.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, StoreError> {
        let tables = self.tables.read().await;
        let mut tenants = tables.tenants.clone();
        tenants.sort_by_key(|t| t.id);
        Ok(tenants)
    }

    async fn create_tenant(&self, name: &str) -> Result<Tenant, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let tenant = Tenant {
            id: next_id(&mut tables.next_tenant),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.tenants.push(tenant.clone());
        Ok(tenant)
    }

    // Teachers

    async fn list_teachers(&self, tenant_id: i64) -> Result<Vec<Teacher>, StoreError> {
        Ok(scoped(&self.tables.read().await.teachers, tenant_id))
    }

    async fn find_teacher(&self, tenant_id: i64, id: i64) -> Result<Option<Teacher>, StoreError> {
        Ok(find_scoped(&self.tables.read().await.teachers, tenant_id, id))
    }

    async fn insert_teacher(&self, tenant_id: i64, fields: &TeacherFields) -> Result<Teacher, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let teacher = Teacher {
            id: next_id(&mut tables.next_teacher),
            tenant_id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            subject: fields.subject.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn update_teacher(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &TeacherFields,
    ) -> Result<Option<Teacher>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(find_scoped_mut(&mut tables.teachers, tenant_id, id).map(|teacher| {
            teacher.first_name = fields.first_name.clone();
            teacher.last_name = fields.last_name.clone();
            teacher.subject = fields.subject.clone();
            teacher.updated_at = Utc::now();
            teacher.clone()
        }))
    }

    async fn delete_teacher(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.courses.iter().any(|c| c.owned_by(tenant_id) && c.teacher_id == id) {
            return Err(fk_violation("courses_teacher_fkey"));
        }
        Ok(remove_scoped(&mut tables.teachers, tenant_id, id))
    }

    async fn count_teacher_courses(&self, tenant_id: i64, teacher_id: i64) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .filter(|c| c.owned_by(tenant_id) && c.teacher_id == teacher_id)
            .count() as i64)
    }

    // Students

    async fn list_students(&self, tenant_id: i64) -> Result<Vec<Student>, StoreError> {
        Ok(scoped(&self.tables.read().await.students, tenant_id))
    }

    async fn find_student(&self, tenant_id: i64, id: i64) -> Result<Option<Student>, StoreError> {
        Ok(find_scoped(&self.tables.read().await.students, tenant_id, id))
    }

    async fn insert_student(&self, tenant_id: i64, fields: &StudentFields) -> Result<Student, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let student = Student {
            id: next_id(&mut tables.next_student),
            tenant_id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            grade: fields.grade,
            created_at: now,
            updated_at: now,
        };
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn update_student(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Student>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(find_scoped_mut(&mut tables.students, tenant_id, id).map(|student| {
            student.first_name = fields.first_name.clone();
            student.last_name = fields.last_name.clone();
            student.grade = fields.grade;
            student.updated_at = Utc::now();
            student.clone()
        }))
    }

    async fn delete_student(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.enrollments.iter().any(|e| e.owned_by(tenant_id) && e.student_id == id) {
            return Err(fk_violation("enrollments_student_fkey"));
        }
        Ok(remove_scoped(&mut tables.students, tenant_id, id))
    }

    async fn count_student_enrollments(&self, tenant_id: i64, student_id: i64) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .filter(|e| e.owned_by(tenant_id) && e.student_id == student_id)
            .count() as i64)
    }

    // Courses

    async fn list_courses(&self, tenant_id: i64) -> Result<Vec<Course>, StoreError> {
        Ok(scoped(&self.tables.read().await.courses, tenant_id))
    }

    async fn find_course(&self, tenant_id: i64, id: i64) -> Result<Option<Course>, StoreError> {
        Ok(find_scoped(&self.tables.read().await.courses, tenant_id, id))
    }

    async fn insert_course(&self, tenant_id: i64, fields: &CourseFields) -> Result<Course, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_course_refs(tenant_id, fields)?;
        let now = Utc::now();
        let course = Course {
            id: next_id(&mut tables.next_course),
            tenant_id,
            course_name: fields.course_name.clone(),
            teacher_id: fields.teacher_id,
            created_at: now,
            updated_at: now,
        };
        tables.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &CourseFields,
    ) -> Result<Option<Course>, StoreError> {
        let mut tables = self.tables.write().await;
        if !exists_scoped(&tables.courses, tenant_id, id) {
            return Ok(None);
        }
        tables.check_course_refs(tenant_id, fields)?;
        Ok(find_scoped_mut(&mut tables.courses, tenant_id, id).map(|course| {
            course.course_name = fields.course_name.clone();
            course.teacher_id = fields.teacher_id;
            course.updated_at = Utc::now();
            course.clone()
        }))
    }

    async fn delete_course(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.enrollments.iter().any(|e| e.owned_by(tenant_id) && e.course_id == id) {
            return Err(fk_violation("enrollments_course_fkey"));
        }
        Ok(remove_scoped(&mut tables.courses, tenant_id, id))
    }

    async fn count_course_enrollments(&self, tenant_id: i64, course_id: i64) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .filter(|e| e.owned_by(tenant_id) && e.course_id == course_id)
            .count() as i64)
    }

    // Enrollments

    async fn list_enrollments(&self, tenant_id: i64) -> Result<Vec<Enrollment>, StoreError> {
        Ok(scoped(&self.tables.read().await.enrollments, tenant_id))
    }

    async fn find_enrollment(&self, tenant_id: i64, id: i64) -> Result<Option<Enrollment>, StoreError> {
        Ok(find_scoped(&self.tables.read().await.enrollments, tenant_id, id))
    }

    async fn insert_enrollment(
        &self,
        tenant_id: i64,
        fields: &EnrollmentFields,
    ) -> Result<Enrollment, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_enrollment_refs(tenant_id, fields)?;
        let now = Utc::now();
        let enrollment = Enrollment {
            id: next_id(&mut tables.next_enrollment),
            tenant_id,
            student_id: fields.student_id,
            course_id: fields.course_id,
            enrollment_date: fields.enrollment_date,
            created_at: now,
            updated_at: now,
        };
        tables.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn update_enrollment(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &EnrollmentFields,
    ) -> Result<Option<Enrollment>, StoreError> {
        let mut tables = self.tables.write().await;
        if !exists_scoped(&tables.enrollments, tenant_id, id) {
            return Ok(None);
        }
        tables.check_enrollment_refs(tenant_id, fields)?;
        Ok(find_scoped_mut(&mut tables.enrollments, tenant_id, id).map(|enrollment| {
            enrollment.student_id = fields.student_id;
            enrollment.course_id = fields.course_id;
            enrollment.enrollment_date = fields.enrollment_date;
            enrollment.updated_at = Utc::now();
            enrollment.clone()
        }))
    }

    async fn delete_enrollment(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(remove_scoped(&mut tables.enrollments, tenant_id, id))
    }

    async fn dashboard_counts(&self, tenant_id: i64) -> Result<DashboardCounts, StoreError> {
        let tables = self.tables.read().await;
        let count = |n: usize| n as i64;

        let teachers: Vec<&Teacher> = tables.teachers.iter().filter(|t| t.owned_by(tenant_id)).collect();
        let subjects: HashSet<&str> = teachers.iter().map(|t| t.subject.as_str()).collect();

        Ok(DashboardCounts {
            total_students: count(tables.students.iter().filter(|s| s.owned_by(tenant_id)).count()),
            total_courses: count(tables.courses.iter().filter(|c| c.owned_by(tenant_id)).count()),
            total_teachers: count(teachers.len()),
            total_subjects: count(subjects.len()),
            total_enrollments: count(tables.enrollments.iter().filter(|e| e.owned_by(tenant_id)).count()),
        })
    }
}
