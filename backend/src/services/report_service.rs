//! Report business logic service.
//!
//! Students address reports to a teacher; teachers read the reports sent to
//! them. Role checks happen at the gate before these functions are called.

use crate::database::models::{CreateReport, Report, ReportWithStudent, Role, UserSummary};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::report_repository::ReportRepository;
use crate::repositories::user_repository::UserRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// A report as shown to the teacher it was sent to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub id: String,
    pub teacher_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub student: UserSummary,
}

impl From<ReportWithStudent> for ReportView {
    fn from(row: ReportWithStudent) -> Self {
        ReportView {
            id: row.id,
            teacher_id: row.teacher_id,
            message: row.message,
            created_at: row.created_at,
            student: UserSummary {
                id: row.student_id,
                name: row.student_name,
                email: row.student_email,
            },
        }
    }
}

pub struct ReportService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReportService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a report from `student_id` addressed to `teacher_id`.
    ///
    /// # Errors
    /// - `Validation` if the message is blank
    /// - `NotFound` if `teacher_id` is not a registered teacher
    pub async fn create_report(
        &self,
        student_id: &str,
        teacher_id: &str,
        message: &str,
    ) -> ServiceResult<Report> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::validation("message: Message is required"));
        }

        let user_repo = UserRepository::new(self.pool);
        match user_repo.get_user_by_id(teacher_id).await? {
            Some(user) if user.role == Role::Teacher => {}
            _ => return Err(ServiceError::not_found("Teacher", teacher_id)),
        }

        let repo = ReportRepository::new(self.pool);
        let report = repo
            .create_report(CreateReport {
                id: Uuid::now_v7().to_string(),
                student_id: student_id.to_string(),
                teacher_id: teacher_id.to_string(),
                message: message.to_string(),
            })
            .await?;

        tracing::info!("Report {} sent to teacher {}", report.id, report.teacher_id);
        Ok(report)
    }

    /// Reports addressed to `teacher_id`, newest first.
    pub async fn list_for_teacher(&self, teacher_id: &str) -> ServiceResult<Vec<ReportView>> {
        let repo = ReportRepository::new(self.pool);
        let reports = repo.list_reports_for_teacher(teacher_id).await?;
        Ok(reports.into_iter().map(ReportView::from).collect())
    }
}
