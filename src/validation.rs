//! Input validation for placement snapshots.
//!
//! Checks structural integrity of a snapshot before optimization.
//! Detects:
//! - Duplicate student ids
//! - Membership entries pointing outside the student table
//! - Students assigned to zero or more than one class
//! - Non-positive target headcounts
//! - Offering list not parallel to the class list

use crate::models::Snapshot;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students share the same id.
    DuplicateId,
    /// A membership entry indexes outside the student table.
    MemberOutOfRange,
    /// A student appears in more than one class.
    MultiplyAssigned,
    /// A student appears in no class.
    Unassigned,
    /// A class has a non-positive target headcount.
    InvalidTarget,
    /// The offering list does not match the class list.
    OfferingMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot before a run.
///
/// Checks:
/// 1. No duplicate student ids
/// 2. All membership entries index existing students
/// 3. Every student belongs to exactly one class
/// 4. All class targets are positive
/// 5. One offering per class
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    // Student ids must be unique.
    let mut ids = HashSet::new();
    for s in &snapshot.students {
        if !ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student id: {}", s.id),
            ));
        }
    }

    // Membership entries must resolve, and each student must appear once.
    let mut seen = vec![0usize; snapshot.students.len()];
    for class in &snapshot.classes {
        if class.target == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTarget,
                format!("Class '{}' has target 0", class.name),
            ));
        }
        for &member in &class.members {
            match seen.get_mut(member) {
                Some(count) => *count += 1,
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MemberOutOfRange,
                    format!(
                        "Class '{}' references student index {} (table has {})",
                        class.name,
                        member,
                        snapshot.students.len()
                    ),
                )),
            }
        }
    }

    for (idx, &count) in seen.iter().enumerate() {
        let id = &snapshot.students[idx].id;
        if count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::Unassigned,
                format!("Student '{id}' is assigned to no class"),
            ));
        } else if count > 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::MultiplyAssigned,
                format!("Student '{id}' is assigned to {count} classes"),
            ));
        }
    }

    if snapshot.offerings.classes.len() != snapshot.classes.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::OfferingMismatch,
            format!(
                "{} offerings for {} classes",
                snapshot.offerings.classes.len(),
                snapshot.classes.len()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, ClassOffering, Offerings, Snapshot, Student};

    fn sample_snapshot() -> Snapshot {
        let students = vec![Student::new("a"), Student::new("b"), Student::new("c")];
        let classes = vec![
            Class::new("A", 2).with_members(vec![0, 1]),
            Class::new("B", 1).with_members(vec![2]),
        ];
        let offerings = Offerings::new(vec![ClassOffering::new(), ClassOffering::new()]);
        Snapshot::new(students, classes, offerings)
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_snapshot(&sample_snapshot()).is_ok());
    }

    #[test]
    fn test_duplicate_student_id() {
        let mut snap = sample_snapshot();
        snap.students[1].id = "a".to_string();
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_member_out_of_range() {
        let mut snap = sample_snapshot();
        snap.classes[0].members.push(99);
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MemberOutOfRange));
    }

    #[test]
    fn test_multiply_assigned() {
        let mut snap = sample_snapshot();
        snap.classes[1].members.push(0); // already in class A
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MultiplyAssigned));
    }

    #[test]
    fn test_unassigned() {
        let mut snap = sample_snapshot();
        snap.classes[1].members.clear();
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::Unassigned && e.message.contains('c')));
    }

    #[test]
    fn test_invalid_target() {
        let mut snap = sample_snapshot();
        snap.classes[0].target = 0;
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTarget));
    }

    #[test]
    fn test_offering_mismatch() {
        let mut snap = sample_snapshot();
        snap.offerings.classes.pop();
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OfferingMismatch));
    }

    #[test]
    fn test_multiple_errors() {
        let mut snap = sample_snapshot();
        snap.students[1].id = "a".to_string();
        snap.classes[0].target = 0;
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
