//! Field-level validation for record input.

use crate::activity::ActivityDraft;
use serde::Serialize;
use thiserror::Error;

/// One rejected field with its message.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Field name as it appears on the input form.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Validation failure carrying every rejected field, never just the first.
#[derive(Debug, Error)]
#[error("validation failed on {} field(s)", .errors.len())]
pub struct ValidationError {
    /// Rejected fields.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    fn push(errors: &mut Vec<FieldError>, field: &'static str, message: impl Into<String>) {
        errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

/// Validate processing-activity input before it is persisted.
pub fn validate_activity(activity: &ActivityDraft) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if activity.dept_id.is_empty() {
        ValidationError::push(&mut errors, "deptId", "Department is required");
    }
    if activity.title.chars().count() < 3 {
        ValidationError::push(&mut errors, "title", "Title must be at least 3 characters");
    }
    if activity.data_subjects.is_empty() {
        ValidationError::push(
            &mut errors,
            "dataSubjects",
            "At least one data subject is required",
        );
    }
    if activity.data_categories.is_empty() {
        ValidationError::push(
            &mut errors,
            "dataCategories",
            "At least one data category is required",
        );
    }
    if activity.lawful_basis.is_empty() {
        ValidationError::push(&mut errors, "lawfulBasis", "Lawful basis is required");
    }
    if activity.recipients.is_empty() {
        ValidationError::push(
            &mut errors,
            "recipients",
            "At least one recipient is required",
        );
    }
    if activity.retention_period.is_empty() {
        ValidationError::push(
            &mut errors,
            "retentionPeriod",
            "Retention period is required",
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Validate an organization slug: lowercase letters, digits, hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if slug.chars().count() < 2 {
        ValidationError::push(&mut errors, "slug", "Slug must be at least 2 characters");
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        ValidationError::push(
            &mut errors,
            "slug",
            "Slug can only contain lowercase letters, numbers, and hyphens",
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Validate a department name.
pub fn validate_department_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < 2 {
        return Err(ValidationError {
            errors: vec![FieldError {
                field: "name",
                message: "Department name must be at least 2 characters".to_string(),
            }],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_activity() -> ActivityDraft {
        ActivityDraft {
            dept_id: "dept-hr".to_string(),
            title: "Employee Payroll Processing".to_string(),
            description: None,
            data_subjects: vec!["Employees".to_string()],
            data_categories: vec!["Financial Information".to_string()],
            lawful_basis: "Legal Obligation".to_string(),
            recipients: vec!["Bank".to_string()],
            retention_period: "5 years after separation".to_string(),
        }
    }

    #[test]
    fn test_valid_activity_passes() {
        assert!(validate_activity(&valid_activity()).is_ok());
    }

    #[test]
    fn test_collects_every_rejected_field() {
        let mut activity = valid_activity();
        activity.title = "ab".to_string();
        activity.data_subjects.clear();
        activity.retention_period.clear();

        let err = validate_activity(&activity).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "dataSubjects", "retentionPeriod"]);
    }

    #[test]
    fn test_slug_rules() {
        assert!(validate_slug("sample-corporation").is_ok());
        assert!(validate_slug("x").is_err());
        assert!(validate_slug("Sample Corp").is_err());
    }

    #[test]
    fn test_department_name() {
        assert!(validate_department_name("HR").is_ok());
        assert!(validate_department_name("H").is_err());
    }
}
