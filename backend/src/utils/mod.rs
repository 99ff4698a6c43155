//! Collection of general utility functions.
//!
//! Home of the session credential codec; small helpers that do not belong to
//! a single domain module go here as well.

pub mod jwt;
