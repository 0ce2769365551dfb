use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_points: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAssignmentRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub due_date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Max points must be positive"))]
    pub max_points: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub due_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Max points must be positive"))]
    pub max_points: Option<i64>,
}

/// Aggregate view for instructors: mean grade and how many enrolled
/// students actually submitted.
#[derive(Debug, Serialize)]
pub struct AssignmentStats {
    pub assignment_id: Uuid,
    pub submission_count: i64,
    pub graded_count: i64,
    /// Mean of grade points, rounded to nearest integer; 0 with no grades.
    pub average_points: i64,
    /// submissions ÷ course enrollment count × 100, rounded; 0 with no enrollments.
    pub submission_rate: i64,
}
