//! Module for student report API endpoints.
//!
//! Students send reports to a teacher; teachers list the reports they received.

pub mod handlers;
pub mod models;
pub mod routes;
