use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{required_positive_int, required_string, FieldErrors};

pub const MAX_COURSE_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub tenant_id: i64,
    pub course_name: String,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseForm {
    pub course_name: Option<Value>,
    pub teacher_id: Option<Value>,
}

/// Validated course fields. `teacher_id` is only shape-checked here; the
/// course service verifies it names a teacher of the acting tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseFields {
    pub course_name: String,
    pub teacher_id: i64,
}

impl CourseForm {
    pub fn validate(self) -> Result<CourseFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let course_name = required_string(&mut errors, "course_name", self.course_name, MAX_COURSE_NAME_LEN);
        let teacher_id = required_positive_int(&mut errors, "teacher_id", self.teacher_id, i64::MAX);

        errors.finish(|| {
            Some(CourseFields {
                course_name: course_name?,
                teacher_id: teacher_id?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(name: String) -> CourseForm {
        serde_json::from_value(json!({ "course_name": name, "teacher_id": 1 })).unwrap()
    }

    #[test]
    fn course_name_boundary() {
        assert!(form("x".repeat(100)).validate().is_ok());

        let errors = form("x".repeat(101)).validate().unwrap_err();
        assert!(errors.contains("course_name"));
        assert!(!errors.contains("teacher_id"));
    }

    #[test]
    fn teacher_id_is_required() {
        let form: CourseForm = serde_json::from_value(json!({ "course_name": "Algebra I" })).unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("teacher_id"), Some("The teacher id field is required."));
    }
}
