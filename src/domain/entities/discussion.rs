use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiscussionThread {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiscussionReply {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewThreadRequest {
    pub course_id: Option<Uuid>,

    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Body cannot be empty"))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewReplyRequest {
    #[validate(length(min = 1, message = "Body cannot be empty"))]
    pub body: String,
}
