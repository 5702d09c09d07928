//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define whole-collection data access contracts for courses.
//! - Isolate serialization details from service/business orchestration.
//!
//! # Invariants
//! - Repositories enforce no business rule; eligibility checks are advisory.
//! - Not-found on update/remove is a silent no-op, never an error.

pub mod course_repo;
