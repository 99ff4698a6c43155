//! Request payloads for the feedback endpoints.

use serde::Deserialize;
use validator::Validate;

/// Body of a feedback submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, message = "Report is required"))]
    pub report_id: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}
