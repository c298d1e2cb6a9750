use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{required_string, FieldErrors, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub tenant_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Teacher form as submitted. Unknown keys (including `tenant_id`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherForm {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub subject: Option<Value>,
}

/// Validated teacher fields, used for both create and full replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherFields {
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
}

impl TeacherForm {
    pub fn validate(self) -> Result<TeacherFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let first_name = required_string(&mut errors, "first_name", self.first_name, MAX_NAME_LEN);
        let last_name = required_string(&mut errors, "last_name", self.last_name, MAX_NAME_LEN);
        let subject = required_string(&mut errors, "subject", self.subject, MAX_NAME_LEN);

        errors.finish(|| {
            Some(TeacherFields {
                first_name: first_name?,
                last_name: last_name?,
                subject: subject?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_complete_form() {
        let form: TeacherForm = serde_json::from_value(json!({
            "first_name": "Ana",
            "last_name": "Lee",
            "subject": "Math",
            "tenant_id": 99
        }))
        .unwrap();

        let fields = form.validate().unwrap();
        assert_eq!(fields.first_name, "Ana");
        assert_eq!(fields.last_name, "Lee");
        assert_eq!(fields.subject, "Math");
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = TeacherForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("first_name"));
        assert!(errors.contains("last_name"));
        assert!(errors.contains("subject"));
    }
}
