//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// The two mutually exclusive capabilities a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum Role {
    /// Submits reports, reads feedback.
    Student,
    /// Reads reports, submits feedback.
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Public view of a user, safe to hand to other users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateReport {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub message: String,
}

/// Report row joined with the submitting student.
#[derive(Debug, Clone, FromRow)]
pub struct ReportWithStudent {
    pub id: String,
    pub teacher_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub report_id: String,
    pub message: String,
    pub report_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub report_id: String,
    pub message: String,
    pub report_message: String,
}

/// Feedback row joined with the responding teacher.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackWithTeacher {
    pub id: String,
    pub report_id: String,
    pub message: String,
    pub report_message: String,
    pub created_at: DateTime<Utc>,
    pub teacher_id: String,
    pub teacher_name: String,
    pub teacher_email: String,
}
