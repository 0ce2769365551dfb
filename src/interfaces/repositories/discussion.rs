use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::discussion::{DiscussionReply, DiscussionThread},
    errors::AppError,
    repositories::sqlx_repo::SqlxDiscussionRepo,
};

#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    async fn create_thread(
        &self,
        author_id: &Uuid,
        course_id: Option<&Uuid>,
        title: &str,
        body: &str,
    ) -> Result<DiscussionThread, AppError>;
    async fn get_thread(&self, id: &Uuid) -> Result<Option<DiscussionThread>, AppError>;
    async fn list_threads(&self, course_id: Option<&Uuid>)
    -> Result<Vec<DiscussionThread>, AppError>;
    /// Replies and thread go in one transaction; no orphaned replies.
    async fn delete_thread(&self, id: &Uuid) -> Result<(), AppError>;

    async fn create_reply(
        &self,
        thread_id: &Uuid,
        author_id: &Uuid,
        body: &str,
    ) -> Result<DiscussionReply, AppError>;
    async fn get_reply(&self, id: &Uuid) -> Result<Option<DiscussionReply>, AppError>;
    async fn list_replies(&self, thread_id: &Uuid) -> Result<Vec<DiscussionReply>, AppError>;
    async fn delete_reply(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxDiscussionRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxDiscussionRepo { pool }
    }
}

#[async_trait]
impl DiscussionRepository for SqlxDiscussionRepo {
    async fn create_thread(
        &self,
        author_id: &Uuid,
        course_id: Option<&Uuid>,
        title: &str,
        body: &str,
    ) -> Result<DiscussionThread, AppError> {
        sqlx::query_as::<_, DiscussionThread>(
            r#"INSERT INTO discussion_threads (id, course_id, author_id, title, body, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(course_id.copied())
        .bind(author_id)
        .bind(title)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Course not found".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn get_thread(&self, id: &Uuid) -> Result<Option<DiscussionThread>, AppError> {
        sqlx::query_as::<_, DiscussionThread>("SELECT * FROM discussion_threads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_threads(
        &self,
        course_id: Option<&Uuid>,
    ) -> Result<Vec<DiscussionThread>, AppError> {
        match course_id {
            Some(course_id) => sqlx::query_as::<_, DiscussionThread>(
                "SELECT * FROM discussion_threads WHERE course_id = ? ORDER BY created_at DESC",
            )
            .bind(course_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from),
            None => sqlx::query_as::<_, DiscussionThread>(
                "SELECT * FROM discussion_threads ORDER BY created_at DESC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from),
        }
    }

    async fn delete_thread(&self, id: &Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM discussion_replies WHERE thread_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM discussion_threads WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Thread not found".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn create_reply(
        &self,
        thread_id: &Uuid,
        author_id: &Uuid,
        body: &str,
    ) -> Result<DiscussionReply, AppError> {
        sqlx::query_as::<_, DiscussionReply>(
            r#"INSERT INTO discussion_replies (id, thread_id, author_id, body, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(thread_id)
        .bind(author_id)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Thread not found".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn get_reply(&self, id: &Uuid) -> Result<Option<DiscussionReply>, AppError> {
        sqlx::query_as::<_, DiscussionReply>("SELECT * FROM discussion_replies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_replies(&self, thread_id: &Uuid) -> Result<Vec<DiscussionReply>, AppError> {
        sqlx::query_as::<_, DiscussionReply>(
            "SELECT * FROM discussion_replies WHERE thread_id = ? ORDER BY created_at",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete_reply(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM discussion_replies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reply not found".to_string()));
        }
        Ok(())
    }
}
