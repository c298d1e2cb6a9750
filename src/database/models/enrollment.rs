use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{required_date, required_positive_int, FieldErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub tenant_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentForm {
    pub student_id: Option<Value>,
    pub course_id: Option<Value>,
    pub enrollment_date: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentFields {
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: NaiveDate,
}

impl EnrollmentForm {
    pub fn validate(self) -> Result<EnrollmentFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let student_id = required_positive_int(&mut errors, "student_id", self.student_id, i64::MAX);
        let course_id = required_positive_int(&mut errors, "course_id", self.course_id, i64::MAX);
        let enrollment_date = required_date(&mut errors, "enrollment_date", self.enrollment_date);

        errors.finish(|| {
            Some(EnrollmentFields {
                student_id: student_id?,
                course_id: course_id?,
                enrollment_date: enrollment_date?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_impossible_date() {
        let form: EnrollmentForm = serde_json::from_value(json!({
            "student_id": 1,
            "course_id": 2,
            "enrollment_date": "2024-02-30"
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("enrollment_date"));
    }

    #[test]
    fn date_serializes_as_calendar_date() {
        let fields = EnrollmentForm {
            student_id: Some(json!(1)),
            course_id: Some(json!("2")),
            enrollment_date: Some(json!("2024-09-02")),
        }
        .validate()
        .unwrap();
        assert_eq!(serde_json::to_value(&fields).unwrap()["enrollment_date"], json!("2024-09-02"));
    }
}
