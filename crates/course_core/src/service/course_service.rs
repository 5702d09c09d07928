//! Course use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete entry points that apply business rules.
//! - Provide search, filter and sort helpers for list views.
//!
//! # Invariants
//! - Every write validates fields before reaching the repository.
//! - Course names are unique at creation time (exact, case-sensitive match).
//! - A course with enrolled students is never removed through this service.
//! - Generated ids never collide with an id already in the collection.
//! - Search output preserves collection order.

use crate::model::course::{Course, CourseDraft, CourseId, CourseStatus, CourseValidationError};
use crate::repo::course_repo::{CourseRepository, RepoError};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service error for course use-cases.
#[derive(Debug)]
pub enum CourseServiceError {
    /// Field constraints failed.
    Validation(CourseValidationError),
    /// Another course already uses this name.
    DuplicateName(String),
    /// Target course does not exist.
    NotFound(CourseId),
    /// Deletion refused because students are enrolled.
    HasEnrolledStudents { id: CourseId, student_count: u32 },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CourseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "course name already exists: `{name}`"),
            Self::NotFound(id) => write!(f, "course not found: {id}"),
            Self::HasEnrolledStudents { id, student_count } => write!(
                f,
                "course {id} cannot be deleted: {student_count} students enrolled"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CourseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CourseValidationError> for CourseServiceError {
    fn from(value: CourseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CourseServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, CourseServiceError>;

/// List-view filter. Unset fields match everything; set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Case-insensitive substring of the course name.
    pub name_query: Option<String>,
    /// Exact instructor match.
    pub instructor: Option<String>,
    pub status: Option<CourseStatus>,
}

impl CourseFilter {
    /// Returns whether `course` passes every set criterion.
    ///
    /// Blank `name_query` and empty `instructor` count as unset. The legacy
    /// list screen searched the raw text, so a whitespace-only query there
    /// only matched names containing that whitespace; here it matches all.
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(query) = self.name_query.as_deref().map(str::trim) {
            if !query.is_empty()
                && !course
                    .name
                    .to_lowercase()
                    .contains(query.to_lowercase().as_str())
            {
                return false;
            }
        }
        if let Some(instructor) = self.instructor.as_deref() {
            if !instructor.is_empty() && course.instructor != instructor {
                return false;
            }
        }
        if let Some(status) = self.status {
            if course.status != status {
                return false;
            }
        }
        true
    }
}

/// Sort direction for student-count ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Stable-sorts `courses` by enrolled student count.
pub fn sort_by_student_count(courses: &mut [Course], order: SortOrder) {
    match order {
        SortOrder::Ascending => courses.sort_by_key(|course| course.student_count),
        SortOrder::Descending => {
            courses.sort_by(|a, b| b.student_count.cmp(&a.student_count));
        }
    }
}

/// Course service facade over repository implementations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists all courses in collection order.
    pub fn list_courses(&self) -> ServiceResult<Vec<Course>> {
        Ok(self.repo.list()?)
    }

    pub fn get_course(&self, id: &str) -> ServiceResult<Option<Course>> {
        Ok(self.repo.get(id)?)
    }

    /// Creates a course from a draft and returns the stored record.
    ///
    /// # Errors
    /// - `Validation` when draft fields are invalid.
    /// - `DuplicateName` when any stored course already has this name.
    pub fn create_course(&self, draft: CourseDraft) -> ServiceResult<Course> {
        draft.validate()?;

        let courses = self.repo.list()?;
        if courses.iter().any(|course| course.name == draft.name) {
            warn!("event=course_create module=service status=rejected reason=duplicate_name");
            return Err(CourseServiceError::DuplicateName(draft.name));
        }

        let id = next_course_id(&courses, now_epoch_ms());
        let course = Course::from_draft(id, draft);
        self.repo.insert(&course)?;
        info!(
            "event=course_create module=service status=ok id={} total={}",
            course.id,
            courses.len() + 1
        );
        Ok(course)
    }

    /// Replaces all editable fields of an existing course.
    ///
    /// Names are not re-checked for uniqueness on update.
    ///
    /// # Errors
    /// - `Validation` when draft fields are invalid.
    /// - `NotFound` when no course has `id`.
    pub fn update_course(&self, id: &str, draft: CourseDraft) -> ServiceResult<Course> {
        draft.validate()?;

        if self.repo.get(id)?.is_none() {
            return Err(CourseServiceError::NotFound(id.to_string()));
        }

        let course = Course::from_draft(id, draft);
        self.repo.update(&course)?;
        info!("event=course_update module=service status=ok id={}", course.id);
        Ok(course)
    }

    /// Deletes a course that has no enrolled students.
    ///
    /// # Errors
    /// - `NotFound` when no course has `id`.
    /// - `HasEnrolledStudents` when the eligibility predicate refuses.
    pub fn delete_course(&self, id: &str) -> ServiceResult<()> {
        if !self.repo.can_delete(id)? {
            return match self.repo.get(id)? {
                Some(course) => {
                    warn!(
                        "event=course_delete module=service status=rejected id={} student_count={}",
                        id, course.student_count
                    );
                    Err(CourseServiceError::HasEnrolledStudents {
                        id: course.id,
                        student_count: course.student_count,
                    })
                }
                None => Err(CourseServiceError::NotFound(id.to_string())),
            };
        }

        self.repo.remove(id)?;
        info!("event=course_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Returns whether `id` may be deleted.
    pub fn can_delete(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.repo.can_delete(id)?)
    }

    /// Returns courses matching `filter`, in collection order.
    pub fn search(&self, filter: &CourseFilter) -> ServiceResult<Vec<Course>> {
        Ok(self
            .repo
            .list()?
            .into_iter()
            .filter(|course| filter.matches(course))
            .collect())
    }

    /// Distinct instructors in first-seen order.
    pub fn instructors(&self) -> ServiceResult<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(self
            .repo
            .list()?
            .into_iter()
            .filter_map(|course| {
                if seen.insert(course.instructor.clone()) {
                    Some(course.instructor)
                } else {
                    None
                }
            })
            .collect())
    }
}

/// Picks a decimal epoch-millisecond id, bumped past any id already taken.
pub fn next_course_id(existing: &[Course], now_ms: u128) -> CourseId {
    let taken: HashSet<&str> = existing.iter().map(|course| course.id.as_str()).collect();
    let mut candidate = now_ms;
    while taken.contains(candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

fn now_epoch_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{next_course_id, sort_by_student_count, CourseFilter, SortOrder};
    use crate::model::course::{Course, CourseDraft, CourseStatus};

    fn course(id: &str, name: &str, students: u32) -> Course {
        let mut draft = CourseDraft::new(name, "A");
        draft.student_count = students;
        Course::from_draft(id, draft)
    }

    #[test]
    fn next_course_id_skips_taken_ids() {
        let existing = vec![course("1000", "a", 0), course("1001", "b", 0)];
        assert_eq!(next_course_id(&existing, 1000), "1002");
        assert_eq!(next_course_id(&existing, 999), "999");
    }

    #[test]
    fn filter_treats_blank_query_as_unset() {
        let filter = CourseFilter {
            name_query: Some("   ".to_string()),
            instructor: Some(String::new()),
            status: None,
        };
        assert!(filter.matches(&course("1", "Algorithms", 0)));
    }

    #[test]
    fn filter_name_query_is_case_insensitive() {
        let filter = CourseFilter {
            name_query: Some("ALGO".to_string()),
            ..CourseFilter::default()
        };
        assert!(filter.matches(&course("1", "Intro to algorithms", 0)));
        assert!(!filter.matches(&course("2", "Databases", 0)));
    }

    #[test]
    fn filter_status_must_match_exactly() {
        let filter = CourseFilter {
            status: Some(CourseStatus::Delayed),
            ..CourseFilter::default()
        };
        assert!(!filter.matches(&course("1", "Algorithms", 0)));
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let mut courses = vec![
            course("1", "a", 3),
            course("2", "b", 1),
            course("3", "c", 3),
            course("4", "d", 0),
        ];

        sort_by_student_count(&mut courses, SortOrder::Ascending);
        let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["4", "2", "1", "3"]);

        sort_by_student_count(&mut courses, SortOrder::Descending);
        let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "2", "4"]);
    }
}
