use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::entities::assignment::{
    Assignment, AssignmentStats, NewAssignmentRequest, UpdateAssignmentRequest,
};
use crate::entities::enrollment::EnrollmentStatus;
use crate::entities::grade::{Grade, GradeRequest};
use crate::entities::submission::{GradedSubmission, Submission, SubmitRequest};
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::repositories::assignment::{AssignmentRepository, GradeUpsert};
use crate::repositories::catalog::CatalogRepository;
use crate::repositories::enrollment::EnrollmentRepository;
use crate::use_cases::extractors::AuthContext;

pub struct GradingHandler<A, E, C>
where
    A: AssignmentRepository,
    E: EnrollmentRepository,
    C: CatalogRepository,
{
    pub assignment_repo: A,
    pub enrollment_repo: E,
    pub catalog_repo: C,
}

impl<A, E, C> GradingHandler<A, E, C>
where
    A: AssignmentRepository,
    E: EnrollmentRepository,
    C: CatalogRepository,
{
    pub fn new(assignment_repo: A, enrollment_repo: E, catalog_repo: C) -> Self {
        GradingHandler {
            assignment_repo,
            enrollment_repo,
            catalog_repo,
        }
    }

    pub async fn create_assignment(
        &self,
        ctx: &AuthContext,
        course_id: &Uuid,
        request: NewAssignmentRequest,
    ) -> Result<Assignment, AppError> {
        request.validate()?;
        self.require_course_owner(ctx, course_id).await?;
        self.assignment_repo
            .create_assignment(course_id, &ctx.user_id, &request)
            .await
    }

    pub async fn update_assignment(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
        request: UpdateAssignmentRequest,
    ) -> Result<Assignment, AppError> {
        request.validate()?;
        let assignment = self.require_assignment(assignment_id).await?;
        self.require_course_owner(ctx, &assignment.course_id).await?;
        self.assignment_repo
            .update_assignment(assignment_id, &request)
            .await
    }

    pub async fn delete_assignment(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
    ) -> Result<(), AppError> {
        let assignment = self.require_assignment(assignment_id).await?;
        self.require_course_owner(ctx, &assignment.course_id).await?;
        self.assignment_repo.delete_assignment(assignment_id).await
    }

    pub async fn list_assignments(&self, course_id: &Uuid) -> Result<Vec<Assignment>, AppError> {
        self.assignment_repo.list_for_course(course_id).await
    }

    pub async fn get_assignment(&self, assignment_id: &Uuid) -> Result<Assignment, AppError> {
        self.require_assignment(assignment_id).await
    }

    /// Students submit to assignments in courses they are actively
    /// enrolled in, before the due date. Resubmission overwrites.
    pub async fn submit(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
        request: SubmitRequest,
    ) -> Result<Submission, AppError> {
        ctx.require_role(Role::Student)?;
        request.validate()?;

        let assignment = self.require_assignment(assignment_id).await?;

        let enrollment = self
            .enrollment_repo
            .get_by_pair(&ctx.user_id, &assignment.course_id)
            .await?
            .ok_or_else(|| AppError::ForbiddenAccess)?;
        if enrollment.status == EnrollmentStatus::Dropped {
            return Err(AppError::ForbiddenAccess);
        }

        if Utc::now() > assignment.due_date {
            return Err(AppError::validation("due_date", "Assignment is past due"));
        }

        self.assignment_repo
            .upsert_submission(
                &assignment,
                &ctx.user_id,
                &request.content,
                request.file_url.as_deref(),
            )
            .await
    }

    pub async fn my_submissions(&self, ctx: &AuthContext) -> Result<Vec<GradedSubmission>, AppError> {
        self.assignment_repo
            .list_submissions_for_user(&ctx.user_id)
            .await
    }

    pub async fn list_submissions(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
    ) -> Result<Vec<GradedSubmission>, AppError> {
        let assignment = self.require_assignment(assignment_id).await?;
        self.require_course_owner(ctx, &assignment.course_id).await?;
        self.assignment_repo.list_submissions(assignment_id).await
    }

    /// Admin-only. Points must land in [0, max_points]; a submission must
    /// exist for the pair.
    pub async fn grade(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
        request: GradeRequest,
    ) -> Result<Grade, AppError> {
        ctx.require_admin()?;

        let assignment = self.require_assignment(assignment_id).await?;
        let upsert = Self::validated_upsert(ctx, &assignment, &request)?;

        self.assignment_repo.upsert_grade(&upsert).await
    }

    /// Same rules per entry as `grade`; the batch commits or rolls back
    /// as a unit.
    pub async fn grade_bulk(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
        requests: Vec<GradeRequest>,
    ) -> Result<Vec<Grade>, AppError> {
        ctx.require_admin()?;

        if requests.is_empty() {
            return Err(AppError::validation("grades", "Batch cannot be empty"));
        }

        let assignment = self.require_assignment(assignment_id).await?;
        let upserts = requests
            .iter()
            .map(|r| Self::validated_upsert(ctx, &assignment, r))
            .collect::<Result<Vec<_>, _>>()?;

        self.assignment_repo.upsert_grades(&upserts).await
    }

    pub async fn assignment_stats(
        &self,
        ctx: &AuthContext,
        assignment_id: &Uuid,
    ) -> Result<AssignmentStats, AppError> {
        let assignment = self.require_assignment(assignment_id).await?;
        self.require_course_owner(ctx, &assignment.course_id).await?;
        self.assignment_repo.assignment_stats(&assignment).await
    }

    fn validated_upsert(
        ctx: &AuthContext,
        assignment: &Assignment,
        request: &GradeRequest,
    ) -> Result<GradeUpsert, AppError> {
        if request.points < 0 || request.points > assignment.max_points {
            return Err(AppError::validation(
                "points",
                format!("Points must be between 0 and {}", assignment.max_points),
            ));
        }

        Ok(GradeUpsert {
            assignment_id: assignment.id,
            user_id: request.user_id,
            points: request.points,
            feedback: request.feedback.clone(),
            graded_by: ctx.user_id,
        })
    }

    async fn require_assignment(&self, id: &Uuid) -> Result<Assignment, AppError> {
        self.assignment_repo
            .get_assignment(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))
    }

    async fn require_course_owner(&self, ctx: &AuthContext, course_id: &Uuid) -> Result<(), AppError> {
        let course = self
            .catalog_repo
            .get_course(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if !ctx.owns_or_admin(&course.created_by) {
            return Err(AppError::ForbiddenAccess);
        }
        Ok(())
    }
}
