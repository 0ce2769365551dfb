use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::user_skill::UserSkill, errors::AppError,
    repositories::sqlx_repo::SqlxUserSkillRepo,
};

#[async_trait]
pub trait UserSkillRepository: Send + Sync {
    /// Upsert keyed by (user_id, skill_id).
    async fn set_level(
        &self,
        user_id: &Uuid,
        skill_id: &Uuid,
        level: i64,
    ) -> Result<UserSkill, AppError>;
    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<UserSkill>, AppError>;
    async fn remove(&self, user_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError>;
}

impl SqlxUserSkillRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxUserSkillRepo { pool }
    }
}

#[async_trait]
impl UserSkillRepository for SqlxUserSkillRepo {
    async fn set_level(
        &self,
        user_id: &Uuid,
        skill_id: &Uuid,
        level: i64,
    ) -> Result<UserSkill, AppError> {
        sqlx::query_as::<_, UserSkill>(
            r#"INSERT INTO user_skills (id, user_id, skill_id, level, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, skill_id) DO UPDATE SET
                level = excluded.level,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(skill_id)
        .bind(level)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Skill not found".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<UserSkill>, AppError> {
        sqlx::query_as::<_, UserSkill>(
            "SELECT * FROM user_skills WHERE user_id = ? ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn remove(&self, user_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM user_skills WHERE user_id = ? AND skill_id = ?")
            .bind(user_id)
            .bind(skill_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Skill entry not found".to_string()));
        }
        Ok(())
    }
}
