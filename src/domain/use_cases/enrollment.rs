use uuid::Uuid;

use crate::entities::certificate::Certificate;
use crate::entities::course::Course;
use crate::entities::enrollment::{Enrollment, EnrollmentStatus};
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::repositories::catalog::CatalogRepository;
use crate::repositories::enrollment::EnrollmentRepository;
use crate::use_cases::extractors::AuthContext;

pub struct EnrollmentHandler<R, C>
where
    R: EnrollmentRepository,
    C: CatalogRepository,
{
    pub enrollment_repo: R,
    pub catalog_repo: C,
}

impl<R, C> EnrollmentHandler<R, C>
where
    R: EnrollmentRepository,
    C: CatalogRepository,
{
    pub fn new(enrollment_repo: R, catalog_repo: C) -> Self {
        EnrollmentHandler {
            enrollment_repo,
            catalog_repo,
        }
    }

    /// Students enroll in published courses; the unique pair constraint
    /// rejects a second enrollment.
    pub async fn enroll(&self, ctx: &AuthContext, course_id: &Uuid) -> Result<Enrollment, AppError> {
        ctx.require_role(Role::Student)?;

        let course = self.require_course(course_id).await?;
        if !course.is_published() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        self.enrollment_repo.enroll(&ctx.user_id, course_id).await
    }

    pub async fn list_mine(&self, ctx: &AuthContext) -> Result<Vec<Enrollment>, AppError> {
        self.enrollment_repo.list_for_user(&ctx.user_id).await
    }

    pub async fn list_for_course(
        &self,
        ctx: &AuthContext,
        course_id: &Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        let course = self.require_course(course_id).await?;
        if !ctx.owns_or_admin(&course.created_by) {
            return Err(AppError::ForbiddenAccess);
        }
        self.enrollment_repo.list_for_course(course_id).await
    }

    /// Admin status override. Completion mints the certificate exactly once.
    pub async fn set_status(
        &self,
        ctx: &AuthContext,
        enrollment_id: &Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, AppError> {
        ctx.require_admin()?;
        self.enrollment_repo.set_status(enrollment_id, status).await
    }

    /// A student may drop their own enrollment; admins may drop any.
    pub async fn drop(
        &self,
        ctx: &AuthContext,
        enrollment_id: &Uuid,
    ) -> Result<Enrollment, AppError> {
        let enrollment = self.require_enrollment(enrollment_id).await?;
        if !ctx.owns_or_admin(&enrollment.user_id) {
            return Err(AppError::ForbiddenAccess);
        }
        self.enrollment_repo
            .set_status(enrollment_id, EnrollmentStatus::Dropped)
            .await
    }

    pub async fn delete(&self, ctx: &AuthContext, enrollment_id: &Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        self.enrollment_repo.delete_enrollment(enrollment_id).await
    }

    pub async fn recompute_progress(
        &self,
        ctx: &AuthContext,
        enrollment_id: &Uuid,
    ) -> Result<Enrollment, AppError> {
        ctx.require_admin()?;
        let enrollment = self.require_enrollment(enrollment_id).await?;
        self.enrollment_repo
            .recompute_progress(&enrollment.user_id, &enrollment.course_id)
            .await
    }

    pub async fn my_certificates(&self, ctx: &AuthContext) -> Result<Vec<Certificate>, AppError> {
        self.enrollment_repo
            .list_certificates_for_user(&ctx.user_id)
            .await
    }

    async fn require_course(&self, course_id: &Uuid) -> Result<Course, AppError> {
        self.catalog_repo
            .get_course(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    async fn require_enrollment(&self, id: &Uuid) -> Result<Enrollment, AppError> {
        self.enrollment_repo
            .get_enrollment(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }
}
