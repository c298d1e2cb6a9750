use async_trait::async_trait;

use crate::database::error::StoreError;
use crate::database::models::{
    Course, CourseFields, DashboardCounts, Enrollment, EnrollmentFields, Student, StudentFields,
    Teacher, TeacherFields, Tenant,
};

/// Row-level persistence for every entity.
///
/// Every entity method takes the acting tenant id and filters on it: a row
/// stored under another tenant behaves exactly like a missing row. Lookups
/// return `None`, updates return `None` and deletes return `false`.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    // Tenant registry
    async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, StoreError>;
    async fn list_tenants(&self) -> Result<Vec<Tenant>, StoreError>;
    async fn create_tenant(&self, name: &str) -> Result<Tenant, StoreError>;

    // Teachers
    async fn list_teachers(&self, tenant_id: i64) -> Result<Vec<Teacher>, StoreError>;
    async fn find_teacher(&self, tenant_id: i64, id: i64) -> Result<Option<Teacher>, StoreError>;
    async fn insert_teacher(&self, tenant_id: i64, fields: &TeacherFields) -> Result<Teacher, StoreError>;
    async fn update_teacher(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &TeacherFields,
    ) -> Result<Option<Teacher>, StoreError>;
    async fn delete_teacher(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError>;
    /// Number of courses taught by the teacher
    async fn count_teacher_courses(&self, tenant_id: i64, teacher_id: i64) -> Result<i64, StoreError>;

    // Students
    async fn list_students(&self, tenant_id: i64) -> Result<Vec<Student>, StoreError>;
    async fn find_student(&self, tenant_id: i64, id: i64) -> Result<Option<Student>, StoreError>;
    async fn insert_student(&self, tenant_id: i64, fields: &StudentFields) -> Result<Student, StoreError>;
    async fn update_student(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Student>, StoreError>;
    async fn delete_student(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError>;
    async fn count_student_enrollments(&self, tenant_id: i64, student_id: i64) -> Result<i64, StoreError>;

    // Courses
    async fn list_courses(&self, tenant_id: i64) -> Result<Vec<Course>, StoreError>;
    async fn find_course(&self, tenant_id: i64, id: i64) -> Result<Option<Course>, StoreError>;
    async fn insert_course(&self, tenant_id: i64, fields: &CourseFields) -> Result<Course, StoreError>;
    async fn update_course(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &CourseFields,
    ) -> Result<Option<Course>, StoreError>;
    async fn delete_course(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError>;
    async fn count_course_enrollments(&self, tenant_id: i64, course_id: i64) -> Result<i64, StoreError>;

    // Enrollments
    async fn list_enrollments(&self, tenant_id: i64) -> Result<Vec<Enrollment>, StoreError>;
    async fn find_enrollment(&self, tenant_id: i64, id: i64) -> Result<Option<Enrollment>, StoreError>;
    async fn insert_enrollment(
        &self,
        tenant_id: i64,
        fields: &EnrollmentFields,
    ) -> Result<Enrollment, StoreError>;
    async fn update_enrollment(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &EnrollmentFields,
    ) -> Result<Option<Enrollment>, StoreError>;
    async fn delete_enrollment(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError>;

    async fn dashboard_counts(&self, tenant_id: i64) -> Result<DashboardCounts, StoreError>;
}
