use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::database::error::StoreError;
use crate::database::manager::DatabaseManager;
use crate::database::models::{
    Course, CourseFields, DashboardCounts, Enrollment, EnrollmentFields, Student, StudentFields,
    Teacher, TeacherFields, Tenant,
};
use crate::database::repository::Repository;
use crate::database::store::SchoolStore;

const TEACHERS: &str = "teachers";
const STUDENTS: &str = "students";
const COURSES: &str = "courses";
const ENROLLMENTS: &str = "enrollments";

/// `SchoolStore` backed by Postgres; see `sql/schema.sql` for the layout
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        Ok(Self::new(DatabaseManager::connect(config).await?))
    }

    fn teachers(&self) -> Repository<'_, Teacher> {
        Repository::new(TEACHERS, &self.pool)
    }

    fn students(&self) -> Repository<'_, Student> {
        Repository::new(STUDENTS, &self.pool)
    }

    fn courses(&self) -> Repository<'_, Course> {
        Repository::new(COURSES, &self.pool)
    }

    fn enrollments(&self) -> Repository<'_, Enrollment> {
        Repository::new(ENROLLMENTS, &self.pool)
    }
}

#[async_trait]
impl SchoolStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, StoreError> {
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(tenants)
    }

    async fn create_tenant(&self, name: &str) -> Result<Tenant, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name, created_at, updated_at) VALUES ($1, NOW(), NOW()) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tenant)
    }

    // Teachers

    async fn list_teachers(&self, tenant_id: i64) -> Result<Vec<Teacher>, StoreError> {
        self.teachers().select_any(tenant_id).await
    }

    async fn find_teacher(&self, tenant_id: i64, id: i64) -> Result<Option<Teacher>, StoreError> {
        self.teachers().select_one(tenant_id, id).await
    }

    async fn insert_teacher(&self, tenant_id: i64, fields: &TeacherFields) -> Result<Teacher, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (tenant_id, first_name, last_name, subject, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.subject)
        .fetch_one(&self.pool)
        .await?;
        Ok(teacher)
    }

    async fn update_teacher(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &TeacherFields,
    ) -> Result<Option<Teacher>, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            UPDATE teachers
            SET first_name = $3, last_name = $4, subject = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.subject)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }

    async fn delete_teacher(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        self.teachers().delete(tenant_id, id).await
    }

    async fn count_teacher_courses(&self, tenant_id: i64, teacher_id: i64) -> Result<i64, StoreError> {
        self.courses().count_where(tenant_id, "teacher_id", teacher_id).await
    }

    // Students

    async fn list_students(&self, tenant_id: i64) -> Result<Vec<Student>, StoreError> {
        self.students().select_any(tenant_id).await
    }

    async fn find_student(&self, tenant_id: i64, id: i64) -> Result<Option<Student>, StoreError> {
        self.students().select_one(tenant_id, id).await
    }

    async fn insert_student(&self, tenant_id: i64, fields: &StudentFields) -> Result<Student, StoreError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (tenant_id, first_name, last_name, grade, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.grade)
        .fetch_one(&self.pool)
        .await?;
        Ok(student)
    }

    async fn update_student(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET first_name = $3, last_name = $4, grade = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.grade)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    async fn delete_student(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        self.students().delete(tenant_id, id).await
    }

    async fn count_student_enrollments(&self, tenant_id: i64, student_id: i64) -> Result<i64, StoreError> {
        self.enrollments().count_where(tenant_id, "student_id", student_id).await
    }

    // Courses

    async fn list_courses(&self, tenant_id: i64) -> Result<Vec<Course>, StoreError> {
        self.courses().select_any(tenant_id).await
    }

    async fn find_course(&self, tenant_id: i64, id: i64) -> Result<Option<Course>, StoreError> {
        self.courses().select_one(tenant_id, id).await
    }

    async fn insert_course(&self, tenant_id: i64, fields: &CourseFields) -> Result<Course, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (tenant_id, course_name, teacher_id, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(&fields.course_name)
        .bind(fields.teacher_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(course)
    }

    async fn update_course(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &CourseFields,
    ) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET course_name = $3, teacher_id = $4, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(&fields.course_name)
        .bind(fields.teacher_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    async fn delete_course(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        self.courses().delete(tenant_id, id).await
    }

    async fn count_course_enrollments(&self, tenant_id: i64, course_id: i64) -> Result<i64, StoreError> {
        self.enrollments().count_where(tenant_id, "course_id", course_id).await
    }

    // Enrollments

    async fn list_enrollments(&self, tenant_id: i64) -> Result<Vec<Enrollment>, StoreError> {
        self.enrollments().select_any(tenant_id).await
    }

    async fn find_enrollment(&self, tenant_id: i64, id: i64) -> Result<Option<Enrollment>, StoreError> {
        self.enrollments().select_one(tenant_id, id).await
    }

    async fn insert_enrollment(
        &self,
        tenant_id: i64,
        fields: &EnrollmentFields,
    ) -> Result<Enrollment, StoreError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (tenant_id, student_id, course_id, enrollment_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(fields.student_id)
        .bind(fields.course_id)
        .bind(fields.enrollment_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(enrollment)
    }

    async fn update_enrollment(
        &self,
        tenant_id: i64,
        id: i64,
        fields: &EnrollmentFields,
    ) -> Result<Option<Enrollment>, StoreError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET student_id = $3, course_id = $4, enrollment_date = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(fields.student_id)
        .bind(fields.course_id)
        .bind(fields.enrollment_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enrollment)
    }

    async fn delete_enrollment(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        self.enrollments().delete(tenant_id, id).await
    }

    async fn dashboard_counts(&self, tenant_id: i64) -> Result<DashboardCounts, StoreError> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM students WHERE tenant_id = $1) AS total_students,
                (SELECT COUNT(*) FROM courses WHERE tenant_id = $1) AS total_courses,
                (SELECT COUNT(*) FROM teachers WHERE tenant_id = $1) AS total_teachers,
                (SELECT COUNT(DISTINCT subject) FROM teachers WHERE tenant_id = $1) AS total_subjects,
                (SELECT COUNT(*) FROM enrollments WHERE tenant_id = $1) AS total_enrollments
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
