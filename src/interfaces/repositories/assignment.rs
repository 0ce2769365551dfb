use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::assignment::{
        Assignment, AssignmentStats, NewAssignmentRequest, UpdateAssignmentRequest,
    },
    entities::grade::Grade,
    entities::submission::{GradedSubmission, Submission},
    errors::AppError,
    repositories::enrollment::completion_ratio,
    repositories::sqlx_repo::SqlxAssignmentRepo,
};

/// A validated grade entry ready to be written.
#[derive(Debug)]
pub struct GradeUpsert {
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub points: i64,
    pub feedback: Option<String>,
    pub graded_by: Uuid,
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create_assignment(
        &self,
        course_id: &Uuid,
        created_by: &Uuid,
        req: &NewAssignmentRequest,
    ) -> Result<Assignment, AppError>;
    async fn update_assignment(
        &self,
        id: &Uuid,
        req: &UpdateAssignmentRequest,
    ) -> Result<Assignment, AppError>;
    async fn delete_assignment(&self, id: &Uuid) -> Result<(), AppError>;
    async fn get_assignment(&self, id: &Uuid) -> Result<Option<Assignment>, AppError>;
    async fn list_for_course(&self, course_id: &Uuid) -> Result<Vec<Assignment>, AppError>;

    /// Upsert keyed by (assignment_id, user_id) plus the enrollment
    /// progress recompute, in one transaction.
    async fn upsert_submission(
        &self,
        assignment: &Assignment,
        user_id: &Uuid,
        content: &str,
        file_url: Option<&str>,
    ) -> Result<Submission, AppError>;
    async fn get_submission(
        &self,
        assignment_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Submission>, AppError>;
    async fn list_submissions(&self, assignment_id: &Uuid)
    -> Result<Vec<GradedSubmission>, AppError>;
    async fn list_submissions_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<GradedSubmission>, AppError>;

    /// Upsert keyed by (assignment_id, user_id); fails NotFound inside the
    /// transaction when no submission exists for the pair.
    async fn upsert_grade(&self, grade: &GradeUpsert) -> Result<Grade, AppError>;
    /// All-or-nothing batch of grade upserts.
    async fn upsert_grades(&self, grades: &[GradeUpsert]) -> Result<Vec<Grade>, AppError>;
    async fn assignment_stats(&self, assignment: &Assignment)
    -> Result<AssignmentStats, AppError>;
}

impl SqlxAssignmentRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxAssignmentRepo { pool }
    }
}

async fn write_grade(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    grade: &GradeUpsert,
) -> Result<Grade, AppError> {
    let submitted: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM submissions WHERE assignment_id = ? AND user_id = ?)",
    )
    .bind(grade.assignment_id)
    .bind(grade.user_id)
    .fetch_one(&mut **tx)
    .await?;

    if !submitted {
        return Err(AppError::NotFound(
            "No submission exists for this assignment and user".to_string(),
        ));
    }

    sqlx::query_as::<_, Grade>(
        r#"INSERT INTO grades (id, assignment_id, user_id, points, feedback, graded_by, graded_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (assignment_id, user_id) DO UPDATE SET
            points = excluded.points,
            feedback = excluded.feedback,
            graded_by = excluded.graded_by,
            graded_at = excluded.graded_at
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(grade.assignment_id)
    .bind(grade.user_id)
    .bind(grade.points)
    .bind(&grade.feedback)
    .bind(grade.graded_by)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await
    .map_err(AppError::from)
}

#[async_trait]
impl AssignmentRepository for SqlxAssignmentRepo {
    async fn create_assignment(
        &self,
        course_id: &Uuid,
        created_by: &Uuid,
        req: &NewAssignmentRequest,
    ) -> Result<Assignment, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Assignment>(
            r#"INSERT INTO assignments (
                id, course_id, title, description, due_date, max_points,
                created_by, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(course_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.due_date)
        .bind(req.max_points)
        .bind(created_by)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_assignment(
        &self,
        id: &Uuid,
        req: &UpdateAssignmentRequest,
    ) -> Result<Assignment, AppError> {
        sqlx::query_as::<_, Assignment>(
            r#"UPDATE assignments SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                due_date = COALESCE(?, due_date),
                max_points = COALESCE(?, max_points),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.due_date)
        .bind(req.max_points)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))
    }

    async fn delete_assignment(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Assignment not found".to_string()));
        }
        Ok(())
    }

    async fn get_assignment(&self, id: &Uuid) -> Result<Option<Assignment>, AppError> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_for_course(&self, course_id: &Uuid) -> Result<Vec<Assignment>, AppError> {
        sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE course_id = ? ORDER BY due_date",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn upsert_submission(
        &self,
        assignment: &Assignment,
        user_id: &Uuid,
        content: &str,
        file_url: Option<&str>,
    ) -> Result<Submission, AppError> {
        let mut tx = self.pool.begin().await?;

        let submission = sqlx::query_as::<_, Submission>(
            r#"INSERT INTO submissions (id, assignment_id, user_id, content, file_url, submitted_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (assignment_id, user_id) DO UPDATE SET
                content = excluded.content,
                file_url = excluded.file_url,
                submitted_at = excluded.submitted_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(assignment.id)
        .bind(user_id)
        .bind(content)
        .bind(file_url)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        // Derived progress stays consistent with the write that changed it.
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assignments WHERE course_id = ?")
                .bind(assignment.course_id)
                .fetch_one(&mut *tx)
                .await?;

        let submitted: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions s
            JOIN assignments a ON a.id = s.assignment_id
            WHERE a.course_id = ? AND s.user_id = ?
            "#,
        )
        .bind(assignment.course_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE enrollments SET progress = ? WHERE user_id = ? AND course_id = ?")
            .bind(completion_ratio(submitted, total))
            .bind(user_id)
            .bind(assignment.course_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(submission)
    }

    async fn get_submission(
        &self,
        assignment_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Submission>, AppError> {
        sqlx::query_as::<_, Submission>(
            "SELECT * FROM submissions WHERE assignment_id = ? AND user_id = ?",
        )
        .bind(assignment_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_submissions(
        &self,
        assignment_id: &Uuid,
    ) -> Result<Vec<GradedSubmission>, AppError> {
        sqlx::query_as::<_, GradedSubmission>(
            r#"SELECT s.id, s.assignment_id, s.user_id, s.content, s.file_url, s.submitted_at,
                g.points, g.feedback, g.graded_at
            FROM submissions s
            LEFT JOIN grades g ON g.assignment_id = s.assignment_id AND g.user_id = s.user_id
            WHERE s.assignment_id = ?
            ORDER BY s.submitted_at
            "#,
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_submissions_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<GradedSubmission>, AppError> {
        sqlx::query_as::<_, GradedSubmission>(
            r#"SELECT s.id, s.assignment_id, s.user_id, s.content, s.file_url, s.submitted_at,
                g.points, g.feedback, g.graded_at
            FROM submissions s
            LEFT JOIN grades g ON g.assignment_id = s.assignment_id AND g.user_id = s.user_id
            WHERE s.user_id = ?
            ORDER BY s.submitted_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn upsert_grade(&self, grade: &GradeUpsert) -> Result<Grade, AppError> {
        let mut tx = self.pool.begin().await?;
        let written = write_grade(&mut tx, grade).await?;
        tx.commit().await?;
        Ok(written)
    }

    async fn upsert_grades(&self, grades: &[GradeUpsert]) -> Result<Vec<Grade>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut written = Vec::with_capacity(grades.len());
        for grade in grades {
            // Any failing entry rolls back the whole batch.
            written.push(write_grade(&mut tx, grade).await?);
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn assignment_stats(
        &self,
        assignment: &Assignment,
    ) -> Result<AssignmentStats, AppError> {
        let submission_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE assignment_id = ?")
                .bind(assignment.id)
                .fetch_one(&self.pool)
                .await?;

        let (graded_count, average): (i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), AVG(points) FROM grades WHERE assignment_id = ?",
        )
        .bind(assignment.id)
        .fetch_one(&self.pool)
        .await?;

        let enrolled: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = ?")
                .bind(assignment.course_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(AssignmentStats {
            assignment_id: assignment.id,
            submission_count,
            graded_count,
            average_points: average.map(|a| a.round() as i64).unwrap_or(0),
            submission_rate: completion_ratio(submission_count, enrolled),
        })
    }
}
