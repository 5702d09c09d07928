//! Course repository contracts and key-value implementation.
//!
//! # Responsibility
//! - Persist the full course collection as one JSON array under one key.
//! - Expose read-all, insert, update-by-id, remove-by-id and the deletion
//!   eligibility predicate.
//!
//! # Invariants
//! - Every mutation is a full read-decode-mutate-encode-write cycle.
//! - Collection order is insertion order.
//! - Duplicate ids and names are accepted; uniqueness belongs to callers.
//! - Read paths surface malformed stored data instead of masking it.

use crate::model::course::Course;
use crate::store::{KeyValueStore, StoreError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized course collection.
pub const COURSE_STORAGE_KEY: &str = "courses";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for course persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Stored value is not a valid course collection.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid persisted course data: {err}"),
            Self::Encode(err) => write!(f, "failed to encode course data: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for the course collection.
pub trait CourseRepository {
    /// Returns the full collection; empty when nothing is stored.
    fn list(&self) -> RepoResult<Vec<Course>>;
    /// Appends `course` without duplicate checks.
    fn insert(&self, course: &Course) -> RepoResult<()>;
    /// Replaces the record whose id matches; unmatched ids change nothing.
    fn update(&self, course: &Course) -> RepoResult<()>;
    /// Drops every record with `id`; absent ids change nothing.
    fn remove(&self, id: &str) -> RepoResult<()>;
    /// True only when a record with `id` exists and has zero students.
    fn can_delete(&self, id: &str) -> RepoResult<bool>;
    /// First record with `id`.
    fn get(&self, id: &str) -> RepoResult<Option<Course>>;
    /// Persists `courses` verbatim, replacing the stored collection.
    fn replace_all(&self, courses: &[Course]) -> RepoResult<()>;
}

/// Course repository over any [`KeyValueStore`].
pub struct KvCourseRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvCourseRepository<S> {
    /// Creates a repository using [`COURSE_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, COURSE_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> RepoResult<Vec<Course>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|err| {
            error!(
                "event=store_decode module=repo status=error key={} bytes={} error={}",
                self.key,
                raw.len(),
                err
            );
            RepoError::Decode(err)
        })
    }

    fn save(&self, courses: &[Course]) -> RepoResult<()> {
        let raw = serde_json::to_string(courses).map_err(RepoError::Encode)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}

impl<S: KeyValueStore> CourseRepository for KvCourseRepository<S> {
    fn list(&self) -> RepoResult<Vec<Course>> {
        self.load()
    }

    fn insert(&self, course: &Course) -> RepoResult<()> {
        let mut courses = self.load()?;
        courses.push(course.clone());
        self.save(&courses)?;
        debug!(
            "event=course_insert module=repo status=ok id={} total={}",
            course.id,
            courses.len()
        );
        Ok(())
    }

    fn update(&self, course: &Course) -> RepoResult<()> {
        let mut courses = self.load()?;
        let mut matched = 0usize;
        for existing in courses.iter_mut().filter(|existing| existing.id == course.id) {
            *existing = course.clone();
            matched += 1;
        }
        self.save(&courses)?;
        debug!(
            "event=course_update module=repo status=ok id={} matched={}",
            course.id, matched
        );
        Ok(())
    }

    fn remove(&self, id: &str) -> RepoResult<()> {
        let mut courses = self.load()?;
        let before = courses.len();
        courses.retain(|course| course.id != id);
        self.save(&courses)?;
        debug!(
            "event=course_remove module=repo status=ok id={} removed={}",
            id,
            before - courses.len()
        );
        Ok(())
    }

    fn can_delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self
            .get(id)?
            .is_some_and(|course| course.has_no_students()))
    }

    fn get(&self, id: &str) -> RepoResult<Option<Course>> {
        Ok(self.load()?.into_iter().find(|course| course.id == id))
    }

    fn replace_all(&self, courses: &[Course]) -> RepoResult<()> {
        self.save(courses)
    }
}
