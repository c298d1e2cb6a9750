//! Resource handlers: tenant-scoped CRUD for each entity plus the dashboard.
//!
//! Every operation takes the resolved `TenantContext` explicitly. Rows of
//! other tenants are reported as `NotFound`, never as forbidden, so callers
//! cannot probe for their existence.

pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod students;
pub mod teachers;

use thiserror::Error;

use crate::database::StoreError;
use crate::validation::{invalid_selection, FieldErrors};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Deletion refused while other records still reference the row
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Delete refused by the store because dependents appeared after the count check
fn map_reference_violation(err: StoreError, message: &str) -> ServiceError {
    match err {
        StoreError::ForeignKeyViolation(_) => ServiceError::Conflict(message.to_string()),
        other => ServiceError::Store(other),
    }
}

/// A referenced row removed between the pre-check and the write reads as
/// invalid input. `references` pairs constraint names with their field; an
/// unrecognised constraint flags every listed field.
fn invalid_reference(err: StoreError, references: &[(&str, &str)]) -> ServiceError {
    let StoreError::ForeignKeyViolation(constraint) = err else {
        return ServiceError::Store(err);
    };

    let mut errors = FieldErrors::new();
    for (name, field) in references {
        if *name == constraint {
            errors.add(field, invalid_selection(field));
        }
    }
    if errors.is_empty() {
        for (_, field) in references {
            errors.add(field, invalid_selection(field));
        }
    }
    errors.into()
}
