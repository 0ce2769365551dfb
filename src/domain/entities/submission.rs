use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub file_url: Option<String>,
    /// Refreshed on every resubmission; no history is kept.
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(url(message = "Invalid file URL"))]
    pub file_url: Option<String>,
}

/// Submission joined with its grade, if one exists.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct GradedSubmission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub points: Option<i64>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
}
