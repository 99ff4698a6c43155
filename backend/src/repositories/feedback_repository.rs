//! Database repository for teacher feedback on reports.

use crate::database::models::{CreateFeedback, Feedback, FeedbackWithTeacher};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct FeedbackRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FeedbackRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores feedback together with a snapshot of the report text it answers.
    pub async fn create_feedback(&self, feedback: CreateFeedback) -> Result<Feedback> {
        let now = Utc::now();
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback
            (id, teacher_id, student_id, report_id, message, report_message, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, teacher_id, student_id, report_id, message, report_message, created_at, updated_at
            "#,
        )
        .bind(&feedback.id)
        .bind(&feedback.teacher_id)
        .bind(&feedback.student_id)
        .bind(&feedback.report_id)
        .bind(&feedback.message)
        .bind(&feedback.report_message)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(feedback)
    }

    /// Feedback received by a student, newest first, with the responding teacher.
    pub async fn list_feedback_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<FeedbackWithTeacher>> {
        let feedback = sqlx::query_as::<_, FeedbackWithTeacher>(
            r#"
            SELECT
            f.id, f.report_id, f.message, f.report_message, f.created_at,
            t.id AS teacher_id, t.name AS teacher_name, t.email AS teacher_email
            FROM feedback f
            JOIN users t ON f.teacher_id = t.id
            WHERE f.student_id = ?
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(self.pool)
        .await?;

        Ok(feedback)
    }
}
