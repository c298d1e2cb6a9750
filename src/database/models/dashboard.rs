use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-tenant entity counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_students: i64,
    pub total_courses: i64,
    pub total_teachers: i64,
    /// Distinct teacher subjects
    pub total_subjects: i64,
    pub total_enrollments: i64,
}
