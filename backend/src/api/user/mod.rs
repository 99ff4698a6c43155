//! Module for the user directory endpoints.
//!
//! Lets a signed-in user pick a teacher to report to, or look up students.

pub mod handlers;
pub mod routes;
