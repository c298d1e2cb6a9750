use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{required_positive_int, required_string, FieldErrors, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub tenant_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub grade: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub grade: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub grade: i32,
}

impl StudentForm {
    pub fn validate(self) -> Result<StudentFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let first_name = required_string(&mut errors, "first_name", self.first_name, MAX_NAME_LEN);
        let last_name = required_string(&mut errors, "last_name", self.last_name, MAX_NAME_LEN);
        let grade = required_positive_int(&mut errors, "grade", self.grade, i32::MAX as i64);

        errors.finish(|| {
            Some(StudentFields {
                first_name: first_name?,
                last_name: last_name?,
                grade: i32::try_from(grade?).ok()?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn grade_may_arrive_as_text() {
        let form: StudentForm = serde_json::from_value(json!({
            "first_name": "Sam",
            "last_name": "Ortiz",
            "grade": "9"
        }))
        .unwrap();
        assert_eq!(form.validate().unwrap().grade, 9);
    }

    #[test]
    fn grade_must_be_positive() {
        let form: StudentForm = serde_json::from_value(json!({
            "first_name": "Sam",
            "last_name": "Ortiz",
            "grade": 0
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("grade"));
    }
}
