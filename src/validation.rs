//! Field-level validation for incoming form payloads.
//!
//! Forms arrive as loosely typed JSON (`Option<Value>` per field) so that a
//! wrong-typed value is reported against its field instead of failing the
//! whole body. Each helper records at most one message per field and returns
//! the typed value when the field is acceptable.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde_json::Value;

/// Maximum length of free-text name fields
pub const MAX_NAME_LEN: usize = 255;

/// Per-field validation messages collected for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.is_empty() {
            return Err(self);
        }
        // Helpers only return None after recording an error
        value().ok_or(self)
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0.into_iter().collect()
    }
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", label(field))
}

/// Required, trimmed, non-empty string of at most `max_len` characters.
/// Message for an id that names no row of the acting tenant
pub fn invalid_selection(field: &str) -> String {
    format!("The selected {} is invalid.", label(field))
}

pub fn required_string(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    max_len: usize,
) -> Option<String> {
    let raw = match value {
        None | Some(Value::Null) => {
            errors.add(field, required_message(field));
            return None;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.add(field, format!("The {} field must be a string.", label(field)));
            return None;
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.add(field, required_message(field));
        return None;
    }
    if trimmed.chars().count() > max_len {
        errors.add(
            field,
            format!("The {} field must not be greater than {} characters.", label(field), max_len),
        );
        return None;
    }

    Some(trimmed.to_string())
}

/// Required integer in `1..=max`. Accepts JSON numbers and numeric strings,
/// since HTML forms submit numbers as text.
pub fn required_positive_int(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    max: i64,
) -> Option<i64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            errors.add(field, required_message(field));
            return None;
        }
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                errors.add(field, required_message(field));
                return None;
            }
            s.parse::<i64>().ok()
        }
        Some(_) => None,
    };

    let Some(n) = parsed else {
        errors.add(field, format!("The {} field must be an integer.", label(field)));
        return None;
    };

    if n < 1 {
        errors.add(field, format!("The {} field must be at least 1.", label(field)));
        return None;
    }
    if n > max {
        errors.add(field, format!("The {} field must not be greater than {}.", label(field), max));
        return None;
    }

    Some(n)
}

/// Required calendar date in `YYYY-MM-DD` form. Impossible dates such as
/// `2024-02-30` are rejected.
pub fn required_date(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<NaiveDate> {
    let raw = match value {
        None | Some(Value::Null) => {
            errors.add(field, required_message(field));
            return None;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.add(field, format!("The {} field must be a valid date.", label(field)));
            return None;
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.add(field, required_message(field));
        return None;
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, format!("The {} field must be a valid date.", label(field)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_is_trimmed_and_required() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_string(&mut errors, "first_name", Some(json!("  Ana ")), MAX_NAME_LEN),
            Some("Ana".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(required_string(&mut errors, "last_name", Some(json!("   ")), MAX_NAME_LEN), None);
        assert_eq!(required_string(&mut errors, "subject", None, MAX_NAME_LEN), None);
        assert_eq!(errors.get("last_name"), Some("The last name field is required."));
        assert_eq!(errors.get("subject"), Some("The subject field is required."));
    }

    #[test]
    fn string_length_counts_characters() {
        let mut errors = FieldErrors::new();
        let exactly = "é".repeat(100);
        assert!(required_string(&mut errors, "course_name", Some(json!(exactly)), 100).is_some());
        assert!(errors.is_empty());

        let over = "a".repeat(101);
        assert!(required_string(&mut errors, "course_name", Some(json!(over)), 100).is_none());
        assert!(errors.get("course_name").unwrap().contains("100 characters"));
    }

    #[test]
    fn selection_message_uses_field_label() {
        assert_eq!(invalid_selection("teacher_id"), "The selected teacher id is invalid.");
    }

    #[test]
    fn string_rejects_other_types() {
        let mut errors = FieldErrors::new();
        assert!(required_string(&mut errors, "subject", Some(json!(42)), MAX_NAME_LEN).is_none());
        assert_eq!(errors.get("subject"), Some("The subject field must be a string."));
    }

    #[test]
    fn positive_int_accepts_numbers_and_numeric_strings() {
        let mut errors = FieldErrors::new();
        assert_eq!(required_positive_int(&mut errors, "grade", Some(json!(7)), 100), Some(7));
        assert_eq!(required_positive_int(&mut errors, "grade", Some(json!(" 12 ")), 100), Some(12));
        assert!(errors.is_empty());
    }

    #[test]
    fn positive_int_rejects_bad_values() {
        let cases = [
            (json!(0), "at least 1"),
            (json!(-3), "at least 1"),
            (json!(2.5), "must be an integer"),
            (json!("ten"), "must be an integer"),
            (json!(true), "must be an integer"),
            (json!(101), "not be greater than 100"),
        ];
        for (value, expected) in cases {
            let mut errors = FieldErrors::new();
            assert!(required_positive_int(&mut errors, "grade", Some(value.clone()), 100).is_none());
            let message = errors.get("grade").unwrap();
            assert!(message.contains(expected), "{value}: {message}");
        }
    }

    #[test]
    fn date_must_exist_on_the_calendar() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_date(&mut errors, "enrollment_date", Some(json!("2024-02-29"))),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(errors.is_empty());

        assert!(required_date(&mut errors, "enrollment_date", Some(json!("2024-02-30"))).is_none());
        assert_eq!(
            errors.get("enrollment_date"),
            Some("The enrollment date field must be a valid date.")
        );
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("teacher_id", "first");
        errors.add("teacher_id", "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("teacher_id"), Some("first"));
    }
}
