use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSkill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_id: Uuid,
    /// Self-reported proficiency, 1 (novice) to 10 (expert).
    pub level: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetSkillLevelRequest {
    pub skill_id: Uuid,

    #[validate(range(min = 1, max = 10, message = "Level must be between 1 and 10"))]
    pub level: i64,
}
