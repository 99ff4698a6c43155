//! Authentication module for user accounts, sessions, and access control.
//!
//! This module provides the public interface for registration and login, the
//! session cookie, and the request gate that guards every protected route.

pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod session;
