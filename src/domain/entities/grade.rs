use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Grade {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub points: i64,
    pub feedback: Option<String>,
    pub graded_by: Uuid,
    pub graded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub user_id: Uuid,
    pub points: i64,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkGradeRequest {
    pub grades: Vec<GradeRequest>,
}
