use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSkillRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 60, message = "Category must be 1-60 characters"))]
    pub category: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSkillRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 60, message = "Category must be 1-60 characters"))]
    pub category: Option<String>,
}
