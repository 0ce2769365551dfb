use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::course::{Course, NewCourseRequest, UpdateCourseRequest},
    entities::skill::{NewSkillRequest, Skill, UpdateSkillRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxCatalogRepo,
};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_skill(&self, skill: &NewSkillRequest) -> Result<Skill, AppError>;
    async fn update_skill(&self, id: &Uuid, update: &UpdateSkillRequest) -> Result<Skill, AppError>;
    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError>;
    async fn get_skill(&self, id: &Uuid) -> Result<Option<Skill>, AppError>;
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;

    async fn create_course(
        &self,
        created_by: &Uuid,
        course: &NewCourseRequest,
    ) -> Result<Course, AppError>;
    async fn update_course(
        &self,
        id: &Uuid,
        update: &UpdateCourseRequest,
    ) -> Result<Course, AppError>;
    async fn delete_course(&self, id: &Uuid) -> Result<(), AppError>;
    async fn get_course(&self, id: &Uuid) -> Result<Option<Course>, AppError>;
    async fn list_courses(&self, published_only: bool) -> Result<Vec<Course>, AppError>;
    async fn set_published(&self, id: &Uuid, published: bool) -> Result<Course, AppError>;
}

impl SqlxCatalogRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxCatalogRepo { pool }
    }
}

#[async_trait]
impl CatalogRepository for SqlxCatalogRepo {
    async fn create_skill(&self, skill: &NewSkillRequest) -> Result<Skill, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Skill>(
            r#"INSERT INTO skills (id, name, description, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&skill.name)
        .bind(&skill.description)
        .bind(&skill.category)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_skill(
        &self,
        id: &Uuid,
        update: &UpdateSkillRequest,
    ) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"UPDATE skills SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                category = COALESCE(?, category),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.category)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
    }

    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Skill not found".to_string()));
        }
        Ok(())
    }

    async fn get_skill(&self, id: &Uuid) -> Result<Option<Skill>, AppError> {
        sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        sqlx::query_as::<_, Skill>("SELECT * FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_course(
        &self,
        created_by: &Uuid,
        course: &NewCourseRequest,
    ) -> Result<Course, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (
                id, title, description, skill_id, created_by, published_at, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, NULL, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.skill_id)
        .bind(created_by)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Referenced skill does not exist".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn update_course(
        &self,
        id: &Uuid,
        update: &UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"UPDATE courses SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                skill_id = COALESCE(?, skill_id),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.skill_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    async fn delete_course(&self, id: &Uuid) -> Result<(), AppError> {
        // Enrollments, assignments, submissions and grades go with it
        // through the declared FK cascades.
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Course not found".to_string()));
        }
        Ok(())
    }

    async fn get_course(&self, id: &Uuid) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_courses(&self, published_only: bool) -> Result<Vec<Course>, AppError> {
        let query = if published_only {
            "SELECT * FROM courses WHERE published_at IS NOT NULL ORDER BY created_at DESC"
        } else {
            "SELECT * FROM courses ORDER BY created_at DESC"
        };

        sqlx::query_as::<_, Course>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn set_published(&self, id: &Uuid, published: bool) -> Result<Course, AppError> {
        let published_at = published.then(Utc::now);

        sqlx::query_as::<_, Course>(
            "UPDATE courses SET published_at = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(published_at)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }
}
