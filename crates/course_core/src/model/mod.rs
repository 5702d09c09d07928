//! Course domain model.
//!
//! # Responsibility
//! - Define the canonical course record persisted by the repository layer.
//! - Define the draft payload accepted by create/update use-cases.
//!
//! # Invariants
//! - Every course is identified by a caller-assigned `CourseId`.
//! - Wire field names follow the persisted JSON layout (`studentCount`).

pub mod course;
