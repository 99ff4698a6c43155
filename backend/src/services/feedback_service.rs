//! Feedback business logic service.
//!
//! Teachers answer a report they received; students read the feedback
//! addressed to them. Each feedback entry keeps a copy of the report text it
//! answers.

use crate::database::models::{CreateFeedback, Feedback, FeedbackWithTeacher, UserSummary};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::repositories::report_repository::ReportRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// The report a feedback entry answers, as it read when the feedback was written.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    pub id: String,
    pub message: String,
}

/// A feedback entry as shown to the student who received it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub teacher: UserSummary,
    pub report: ReportSnapshot,
}

impl From<FeedbackWithTeacher> for FeedbackView {
    fn from(row: FeedbackWithTeacher) -> Self {
        FeedbackView {
            id: row.id,
            message: row.message,
            created_at: row.created_at,
            teacher: UserSummary {
                id: row.teacher_id,
                name: row.teacher_name,
                email: row.teacher_email,
            },
            report: ReportSnapshot {
                id: row.report_id,
                message: row.report_message,
            },
        }
    }
}

pub struct FeedbackService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FeedbackService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores feedback from `teacher_id` on `report_id`.
    ///
    /// # Errors
    /// - `Validation` if the message is blank
    /// - `NotFound` if the report does not exist
    /// - `PermissionDenied` if the report was sent to another teacher
    pub async fn create_feedback(
        &self,
        teacher_id: &str,
        report_id: &str,
        message: &str,
    ) -> ServiceResult<Feedback> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::validation("message: Message is required"));
        }

        let report = ReportRepository::new(self.pool)
            .get_report_by_id(report_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", report_id))?;

        if report.teacher_id != teacher_id {
            return Err(ServiceError::permission_denied(
                "Feedback can only be given on reports sent to you",
            ));
        }

        let feedback = FeedbackRepository::new(self.pool)
            .create_feedback(CreateFeedback {
                id: Uuid::now_v7().to_string(),
                teacher_id: teacher_id.to_string(),
                student_id: report.student_id,
                report_id: report.id,
                message: message.to_string(),
                report_message: report.message,
            })
            .await?;

        tracing::info!(
            "Feedback {} on report {} for student {}",
            feedback.id,
            feedback.report_id,
            feedback.student_id
        );
        Ok(feedback)
    }

    /// Feedback addressed to `student_id`, newest first.
    pub async fn list_for_student(&self, student_id: &str) -> ServiceResult<Vec<FeedbackView>> {
        let repo = FeedbackRepository::new(self.pool);
        let feedback = repo.list_feedback_for_student(student_id).await?;
        Ok(feedback.into_iter().map(FeedbackView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use crate::database::test_support::memory_database;
    use crate::services::report_service::ReportService;
    use crate::services::user_service::{NewUser, UserService};

    async fn register(pool: &SqlitePool, name: &str, role: Role) -> String {
        UserService::new(pool, 4)
            .create_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password: "pw".to_string(),
                role,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_feedback_snapshots_report() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let student = register(pool, "Ada", Role::Student).await;
        let teacher = register(pool, "Grace", Role::Teacher).await;

        let report = ReportService::new(pool)
            .create_report(&student, &teacher, "I am stuck on recursion")
            .await
            .unwrap();

        let service = FeedbackService::new(pool);
        let feedback = service
            .create_feedback(&teacher, &report.id, "Try smaller inputs")
            .await
            .unwrap();
        assert_eq!(feedback.student_id, student);
        assert_eq!(feedback.report_message, "I am stuck on recursion");

        let listed = service.list_for_student(&student).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].message, "Try smaller inputs");
        assert_eq!(listed[0].teacher.name, "Grace");
        assert_eq!(listed[0].report.id, report.id);
        assert_eq!(listed[0].report.message, "I am stuck on recursion");

        let other = register(pool, "Bo", Role::Student).await;
        assert!(service.list_for_student(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_student_feedback_newest_first() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let student = register(pool, "Ada", Role::Student).await;
        let grace = register(pool, "Grace", Role::Teacher).await;
        let alan = register(pool, "Alan", Role::Teacher).await;

        let reports = ReportService::new(pool);
        let to_grace = reports.create_report(&student, &grace, "loops").await.unwrap();
        let to_alan = reports.create_report(&student, &alan, "types").await.unwrap();

        let service = FeedbackService::new(pool);
        let first = service
            .create_feedback(&grace, &to_grace.id, "Trace it by hand")
            .await
            .unwrap();
        let second = service
            .create_feedback(&alan, &to_alan.id, "Read the error")
            .await
            .unwrap();

        let listed = service.list_for_student(&student).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        assert_eq!(listed[0].teacher.name, "Alan");
        assert_eq!(listed[1].report.message, "loops");
    }

    #[tokio::test]
    async fn test_feedback_on_unknown_report() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let teacher = register(pool, "Grace", Role::Teacher).await;

        assert!(matches!(
            FeedbackService::new(pool)
                .create_feedback(&teacher, "missing", "hello")
                .await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_feedback_on_another_teachers_report() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let student = register(pool, "Ada", Role::Student).await;
        let grace = register(pool, "Grace", Role::Teacher).await;
        let alan = register(pool, "Alan", Role::Teacher).await;

        let report = ReportService::new(pool)
            .create_report(&student, &grace, "question")
            .await
            .unwrap();

        assert!(matches!(
            FeedbackService::new(pool)
                .create_feedback(&alan, &report.id, "answer")
                .await,
            Err(ServiceError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_feedback_view_wire_format() {
        let view = FeedbackView {
            id: "f1".to_string(),
            message: "Nice".to_string(),
            created_at: Utc::now(),
            teacher: UserSummary {
                id: "t1".to_string(),
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            },
            report: ReportSnapshot {
                id: "r1".to_string(),
                message: "Help".to_string(),
            },
        };

        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["teacher"]["email"], "grace@example.com");
        assert_eq!(value["report"]["message"], "Help");
    }
}
