pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod student;
pub mod teacher;
pub mod tenant;

pub use course::{Course, CourseFields, CourseForm};
pub use dashboard::DashboardCounts;
pub use enrollment::{Enrollment, EnrollmentFields, EnrollmentForm};
pub use student::{Student, StudentFields, StudentForm};
pub use teacher::{Teacher, TeacherFields, TeacherForm};
pub use tenant::Tenant;

/// A row owned by exactly one tenant
pub trait TenantOwned {
    fn id(&self) -> i64;
    fn tenant_id(&self) -> i64;

    fn owned_by(&self, tenant_id: i64) -> bool {
        self.tenant_id() == tenant_id
    }
}

macro_rules! impl_tenant_owned {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TenantOwned for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn tenant_id(&self) -> i64 {
                    self.tenant_id
                }
            }
        )+
    };
}

impl_tenant_owned!(Teacher, Student, Course, Enrollment);
