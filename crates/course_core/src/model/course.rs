//! Course domain model.
//!
//! # Responsibility
//! - Define the canonical course record and its status enum.
//! - Provide field validation used by service write paths.
//!
//! # Invariants
//! - `id` is assigned by the caller and never rewritten by storage.
//! - `name` is non-blank and at most `MAX_COURSE_NAME_CHARS` characters.
//! - `student_count` is unsigned, so it can never be negative.
//! - Status `Closed` is always serialized as `"Closed"`; the legacy `"Close"`
//!   spelling is accepted on decode only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maximum course name length, counted in Unicode scalar values.
pub const MAX_COURSE_NAME_CHARS: usize = 100;

/// Caller-assigned course identifier, typically a timestamp-derived string.
pub type CourseId = String;

/// Lifecycle state of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    /// Accepting enrollments.
    #[default]
    Open,
    /// Finished.
    #[serde(alias = "Close")]
    Closed,
    /// Temporarily postponed.
    Delayed,
}

impl CourseStatus {
    /// All variants in display order.
    pub const ALL: [CourseStatus; 3] = [Self::Open, Self::Closed, Self::Delayed];

    /// Returns the persisted wire literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Delayed => "Delayed",
        }
    }
}

impl Display for CourseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = CourseValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" | "close" => Ok(Self::Closed),
            "delayed" => Ok(Self::Delayed),
            _ => Err(CourseValidationError::UnknownStatus(value.to_string())),
        }
    }
}

/// Field-level validation failure for course records and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    EmptyId,
    EmptyName,
    NameTooLong { chars: usize, max: usize },
    EmptyInstructor,
    UnknownStatus(String),
}

impl Display for CourseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "course id cannot be empty"),
            Self::EmptyName => write!(f, "course name is required"),
            Self::NameTooLong { chars, max } => write!(
                f,
                "course name has {chars} characters; at most {max} are allowed"
            ),
            Self::EmptyInstructor => write!(f, "instructor is required"),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown course status `{value}`; expected Open|Closed|Delayed"
            ),
        }
    }
}

impl Error for CourseValidationError {}

/// Canonical persisted course record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub instructor: String,
    /// Free-text summary; absent values are omitted from the stored record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enrolled students. Missing in stored data decodes as zero.
    #[serde(default)]
    pub student_count: u32,
    pub status: CourseStatus,
}

impl Course {
    /// Builds a course from a caller-assigned id and a draft payload.
    ///
    /// Does not validate; call [`Course::validate`] before persisting.
    pub fn from_draft(id: impl Into<CourseId>, draft: CourseDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            instructor: draft.instructor,
            description: draft.description,
            student_count: draft.student_count,
            status: draft.status,
        }
    }

    /// Checks field constraints.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - Any error produced by [`validate_fields`].
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if self.id.trim().is_empty() {
            return Err(CourseValidationError::EmptyId);
        }
        validate_fields(&self.name, &self.instructor)
    }

    /// Returns whether the course has no enrolled students.
    pub fn has_no_students(&self) -> bool {
        self.student_count == 0
    }
}

/// Course payload without identity, as submitted by a create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub name: String,
    pub instructor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub status: CourseStatus,
}

impl CourseDraft {
    /// Creates an `Open` draft with no enrolled students and no description.
    pub fn new(name: impl Into<String>, instructor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructor: instructor.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CourseValidationError> {
        validate_fields(&self.name, &self.instructor)
    }
}

/// Validates the fields shared by `Course` and `CourseDraft`.
pub fn validate_fields(name: &str, instructor: &str) -> Result<(), CourseValidationError> {
    if name.trim().is_empty() {
        return Err(CourseValidationError::EmptyName);
    }
    let chars = name.chars().count();
    if chars > MAX_COURSE_NAME_CHARS {
        return Err(CourseValidationError::NameTooLong {
            chars,
            max: MAX_COURSE_NAME_CHARS,
        });
    }
    if instructor.trim().is_empty() {
        return Err(CourseValidationError::EmptyInstructor);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Course, CourseDraft, CourseStatus, CourseValidationError, MAX_COURSE_NAME_CHARS};

    fn course(name: &str, instructor: &str) -> Course {
        Course::from_draft("1", CourseDraft::new(name, instructor))
    }

    #[test]
    fn draft_defaults_to_open_without_students() {
        let draft = CourseDraft::new("Algorithms", "A");
        assert_eq!(draft.status, CourseStatus::Open);
        assert_eq!(draft.student_count, 0);
    }

    #[test]
    fn validate_accepts_name_at_limit() {
        let name = "x".repeat(MAX_COURSE_NAME_CHARS);
        assert!(course(&name, "A").validate().is_ok());
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_COURSE_NAME_CHARS);
        assert!(course(&name, "A").validate().is_ok());

        let too_long = "é".repeat(MAX_COURSE_NAME_CHARS + 1);
        assert_eq!(
            course(&too_long, "A").validate().unwrap_err(),
            CourseValidationError::NameTooLong {
                chars: MAX_COURSE_NAME_CHARS + 1,
                max: MAX_COURSE_NAME_CHARS,
            }
        );
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert_eq!(
            course("  ", "A").validate().unwrap_err(),
            CourseValidationError::EmptyName
        );
        assert_eq!(
            course("Algorithms", "").validate().unwrap_err(),
            CourseValidationError::EmptyInstructor
        );

        let mut no_id = course("Algorithms", "A");
        no_id.id = " ".to_string();
        assert_eq!(no_id.validate().unwrap_err(), CourseValidationError::EmptyId);
    }

    #[test]
    fn status_parses_case_insensitively_and_accepts_legacy_close() {
        assert_eq!("open".parse::<CourseStatus>().unwrap(), CourseStatus::Open);
        assert_eq!("Close".parse::<CourseStatus>().unwrap(), CourseStatus::Closed);
        assert_eq!(" DELAYED ".parse::<CourseStatus>().unwrap(), CourseStatus::Delayed);
        assert!(matches!(
            "archived".parse::<CourseStatus>().unwrap_err(),
            CourseValidationError::UnknownStatus(value) if value == "archived"
        ));
    }
}
