//! Database repository for student reports.

use crate::database::models::{CreateReport, Report, ReportWithStudent};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct ReportRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReportRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a report submitted by a student.
    pub async fn create_report(&self, report: CreateReport) -> Result<Report> {
        let now = Utc::now();
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (id, student_id, teacher_id, message, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, student_id, teacher_id, message, created_at, updated_at
            "#,
        )
        .bind(&report.id)
        .bind(&report.student_id)
        .bind(&report.teacher_id)
        .bind(&report.message)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(report)
    }

    pub async fn get_report_by_id(&self, id: &str) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, student_id, teacher_id, message, created_at, updated_at
            FROM reports WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(report)
    }

    /// Reports addressed to a teacher, newest first, with the submitting student.
    pub async fn list_reports_for_teacher(&self, teacher_id: &str) -> Result<Vec<ReportWithStudent>> {
        let reports = sqlx::query_as::<_, ReportWithStudent>(
            r#"
            SELECT
            r.id, r.teacher_id, r.message, r.created_at,
            s.id AS student_id, s.name AS student_name, s.email AS student_email
            FROM reports r
            JOIN users s ON r.student_id = s.id
            WHERE r.teacher_id = ?
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reports)
    }
}
