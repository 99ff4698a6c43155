//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between the repositories, such as sending a
//! report to a teacher or answering it with feedback.

pub mod feedback_service;
pub mod report_service;
pub mod user_service;
