use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    constants::START_TIME,
    entities::analytics::{AdminOverview, AssignmentReportRow, CourseReport, EnrollmentCounts},
    errors::AppError,
    repositories::sqlx_repo::SqlxAnalyticsRepo,
};

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn overview(&self) -> Result<AdminOverview, AppError>;
    async fn course_report(&self, course_id: &Uuid) -> Result<CourseReport, AppError>;
}

impl SqlxAnalyticsRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxAnalyticsRepo { pool }
    }

    async fn count(&self, query: &str) -> Result<i64, AppError> {
        sqlx::query_scalar(query)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl AnalyticsRepository for SqlxAnalyticsRepo {
    async fn overview(&self) -> Result<AdminOverview, AppError> {
        let users = self.count("SELECT COUNT(*) FROM users").await?;
        let published_courses = self
            .count("SELECT COUNT(*) FROM courses WHERE published_at IS NOT NULL")
            .await?;
        let draft_courses = self
            .count("SELECT COUNT(*) FROM courses WHERE published_at IS NULL")
            .await?;
        let enrolled = self
            .count("SELECT COUNT(*) FROM enrollments WHERE status = 'enrolled'")
            .await?;
        let completed = self
            .count("SELECT COUNT(*) FROM enrollments WHERE status = 'completed'")
            .await?;
        let dropped = self
            .count("SELECT COUNT(*) FROM enrollments WHERE status = 'dropped'")
            .await?;
        let submissions = self.count("SELECT COUNT(*) FROM submissions").await?;
        let grades = self.count("SELECT COUNT(*) FROM grades").await?;
        let threads = self.count("SELECT COUNT(*) FROM discussion_threads").await?;

        let average: Option<f64> = sqlx::query_scalar("SELECT AVG(points) FROM grades")
            .fetch_one(&self.pool)
            .await?;

        Ok(AdminOverview {
            users,
            published_courses,
            draft_courses,
            enrollments: EnrollmentCounts {
                enrolled,
                completed,
                dropped,
            },
            submissions,
            grades,
            threads,
            average_grade_points: average.map(|a| a.round() as i64).unwrap_or(0),
            uptime_seconds: (Utc::now() - *START_TIME).num_seconds(),
        })
    }

    async fn course_report(&self, course_id: &Uuid) -> Result<CourseReport, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?)")
            .bind(course_id)
            .fetch_one(&self.pool)
            .await?;
        if !exists {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let enrollment_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = ?")
                .bind(course_id)
                .fetch_one(&self.pool)
                .await?;

        let rows: Vec<(Uuid, String, i64, Option<f64>)> = sqlx::query_as(
            r#"SELECT a.id, a.title,
                (SELECT COUNT(*) FROM submissions s WHERE s.assignment_id = a.id),
                (SELECT AVG(g.points) FROM grades g WHERE g.assignment_id = a.id)
            FROM assignments a
            WHERE a.course_id = ?
            ORDER BY a.due_date
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        let assignments = rows
            .into_iter()
            .map(
                |(assignment_id, title, submission_count, average)| AssignmentReportRow {
                    assignment_id,
                    title,
                    submission_count,
                    average_points: average.map(|a| a.round() as i64).unwrap_or(0),
                },
            )
            .collect();

        Ok(CourseReport {
            course_id: *course_id,
            enrollment_count,
            assignments,
        })
    }
}
