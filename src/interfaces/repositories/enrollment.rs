use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::certificate::Certificate,
    entities::enrollment::{Enrollment, EnrollmentStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxEnrollmentRepo,
};

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Single INSERT; the UNIQUE(user_id, course_id) constraint turns a
    /// duplicate enrollment into a Conflict without a read-then-write race.
    async fn enroll(&self, user_id: &Uuid, course_id: &Uuid) -> Result<Enrollment, AppError>;
    async fn get_enrollment(&self, id: &Uuid) -> Result<Option<Enrollment>, AppError>;
    async fn get_by_pair(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
    ) -> Result<Option<Enrollment>, AppError>;
    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<Enrollment>, AppError>;
    async fn list_for_course(&self, course_id: &Uuid) -> Result<Vec<Enrollment>, AppError>;
    /// Status change; completion stamps `completed_at` and issues the
    /// pair's certificate idempotently in the same transaction.
    async fn set_status(
        &self,
        id: &Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, AppError>;
    /// Removes the enrollment and the pair's certificate atomically.
    async fn delete_enrollment(&self, id: &Uuid) -> Result<(), AppError>;
    async fn recompute_progress(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
    ) -> Result<Enrollment, AppError>;
    async fn list_certificates_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Certificate>, AppError>;
}

impl SqlxEnrollmentRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxEnrollmentRepo { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for SqlxEnrollmentRepo {
    async fn enroll(&self, user_id: &Uuid, course_id: &Uuid) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (
                id, user_id, course_id, status, progress, enrolled_at, completed_at
            )
            VALUES (?, ?, ?, 'enrolled', 0, ?, NULL)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(course_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Already enrolled in this course".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Course not found".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn get_enrollment(&self, id: &Uuid) -> Result<Option<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_pair(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
    ) -> Result<Option<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE user_id = ? AND course_id = ?",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE user_id = ? ORDER BY enrolled_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_for_course(&self, course_id: &Uuid) -> Result<Vec<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE course_id = ? ORDER BY enrolled_at DESC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn set_status(
        &self,
        id: &Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, AppError> {
        let mut tx = self.pool.begin().await?;

        let now = Utc::now();

        // completed_at records when the course was first finished; status
        // changes away from completed leave it in place.
        let enrollment = if status == EnrollmentStatus::Completed {
            sqlx::query_as::<_, Enrollment>(
                r#"UPDATE enrollments SET status = ?, completed_at = ?
                WHERE id = ?
                RETURNING *
                "#,
            )
            .bind(status)
            .bind(now)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        } else {
            sqlx::query_as::<_, Enrollment>(
                r#"UPDATE enrollments SET status = ?
                WHERE id = ?
                RETURNING *
                "#,
            )
            .bind(status)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        }
        .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        if status == EnrollmentStatus::Completed {
            // ON CONFLICT DO NOTHING: completing twice never mints a
            // second certificate for the pair.
            sqlx::query(
                r#"INSERT INTO certificates (id, user_id, course_id, issued_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (user_id, course_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(enrollment.user_id)
            .bind(enrollment.course_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(enrollment)
    }

    async fn delete_enrollment(&self, id: &Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        sqlx::query("DELETE FROM certificates WHERE user_id = ? AND course_id = ?")
            .bind(enrollment.user_id)
            .bind(enrollment.course_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM enrollments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn recompute_progress(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
    ) -> Result<Enrollment, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assignments WHERE course_id = ?")
                .bind(course_id)
                .fetch_one(&self.pool)
                .await?;

        let submitted: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions s
            JOIN assignments a ON a.id = s.assignment_id
            WHERE a.course_id = ? AND s.user_id = ?
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let progress = completion_ratio(submitted, total);

        sqlx::query_as::<_, Enrollment>(
            r#"UPDATE enrollments SET progress = ?
            WHERE user_id = ? AND course_id = ?
            RETURNING *
            "#,
        )
        .bind(progress)
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }

    async fn list_certificates_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Certificate>, AppError> {
        sqlx::query_as::<_, Certificate>(
            "SELECT * FROM certificates WHERE user_id = ? ORDER BY issued_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}

/// Completion-count ratio in percent, rounded; a course with no
/// assignments reports 0 rather than dividing by zero.
pub fn completion_ratio(submitted: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((submitted * 100) as f64 / total as f64).round() as i64
}
