//! Request payloads for the report endpoints.

use serde::Deserialize;
use validator::Validate;

/// Body of a report submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[validate(length(min = 1, message = "Teacher is required"))]
    pub teacher_id: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}
