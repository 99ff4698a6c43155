//! Module for teacher feedback API endpoints.

pub mod handlers;
pub mod models;
pub mod routes;
