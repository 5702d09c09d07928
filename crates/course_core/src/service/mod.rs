//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the business rules that repositories leave to callers.
//!
//! # See also
//! - `repo::course_repo` for the storage contract.

pub mod course_service;
