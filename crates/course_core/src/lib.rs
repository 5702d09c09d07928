//! Core domain logic for the course registry.
//! This crate is the single source of truth for course storage and rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{
    Course, CourseDraft, CourseId, CourseStatus, CourseValidationError, MAX_COURSE_NAME_CHARS,
};
pub use repo::course_repo::{
    CourseRepository, KvCourseRepository, RepoError, RepoResult, COURSE_STORAGE_KEY,
};
pub use service::course_service::{
    sort_by_student_count, CourseFilter, CourseService, CourseServiceError, ServiceResult,
    SortOrder,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
