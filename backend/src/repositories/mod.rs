//! Data access layer.
//!
//! Each repository wraps a borrowed SQLite pool and exposes the create / find /
//! sort operations the services need for one entity.

pub mod feedback_repository;
pub mod report_repository;
pub mod user_repository;
