use uuid::Uuid;
use validator::Validate;

use crate::entities::course::{Course, NewCourseRequest, UpdateCourseRequest};
use crate::entities::skill::{NewSkillRequest, Skill, UpdateSkillRequest};
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::repositories::catalog::CatalogRepository;
use crate::use_cases::extractors::AuthContext;

pub struct CatalogHandler<R>
where
    R: CatalogRepository,
{
    pub catalog_repo: R,
}

impl<R> CatalogHandler<R>
where
    R: CatalogRepository,
{
    pub fn new(catalog_repo: R) -> Self {
        CatalogHandler { catalog_repo }
    }

    pub async fn create_skill(
        &self,
        ctx: &AuthContext,
        request: NewSkillRequest,
    ) -> Result<Skill, AppError> {
        ctx.require_admin()?;
        request.validate()?;
        self.catalog_repo.create_skill(&request).await
    }

    pub async fn update_skill(
        &self,
        ctx: &AuthContext,
        id: &Uuid,
        request: UpdateSkillRequest,
    ) -> Result<Skill, AppError> {
        ctx.require_admin()?;
        request.validate()?;
        self.catalog_repo.update_skill(id, &request).await
    }

    pub async fn delete_skill(&self, ctx: &AuthContext, id: &Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        self.catalog_repo.delete_skill(id).await
    }

    pub async fn get_skill(&self, id: &Uuid) -> Result<Skill, AppError> {
        self.catalog_repo
            .get_skill(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.catalog_repo.list_skills().await
    }

    pub async fn create_course(
        &self,
        ctx: &AuthContext,
        request: NewCourseRequest,
    ) -> Result<Course, AppError> {
        if !matches!(ctx.role, Role::Admin | Role::Instructor) {
            return Err(AppError::ForbiddenAccess);
        }
        request.validate()?;
        self.catalog_repo.create_course(&ctx.user_id, &request).await
    }

    pub async fn update_course(
        &self,
        ctx: &AuthContext,
        id: &Uuid,
        request: UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        request.validate()?;
        self.require_course_owner(ctx, id).await?;
        self.catalog_repo.update_course(id, &request).await
    }

    pub async fn delete_course(&self, ctx: &AuthContext, id: &Uuid) -> Result<(), AppError> {
        self.require_course_owner(ctx, id).await?;
        self.catalog_repo.delete_course(id).await
    }

    pub async fn set_published(
        &self,
        ctx: &AuthContext,
        id: &Uuid,
        published: bool,
    ) -> Result<Course, AppError> {
        self.require_course_owner(ctx, id).await?;
        self.catalog_repo.set_published(id, published).await
    }

    /// Drafts are only visible to staff; students see published courses.
    pub async fn get_course(&self, ctx: Option<&AuthContext>, id: &Uuid) -> Result<Course, AppError> {
        let course = self
            .catalog_repo
            .get_course(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if !course.is_published() && !Self::is_staff(ctx, &course) {
            return Err(AppError::NotFound("Course not found".to_string()));
        }
        Ok(course)
    }

    pub async fn list_courses(&self, ctx: Option<&AuthContext>) -> Result<Vec<Course>, AppError> {
        let all = matches!(
            ctx.map(|c| c.role),
            Some(Role::Admin) | Some(Role::Instructor)
        );
        self.catalog_repo.list_courses(!all).await
    }

    fn is_staff(ctx: Option<&AuthContext>, course: &Course) -> bool {
        match ctx {
            Some(ctx) => ctx.is_admin() || ctx.user_id == course.created_by,
            None => false,
        }
    }

    async fn require_course_owner(&self, ctx: &AuthContext, id: &Uuid) -> Result<Course, AppError> {
        let course = self
            .catalog_repo
            .get_course(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if !ctx.owns_or_admin(&course.created_by) {
            return Err(AppError::ForbiddenAccess);
        }
        Ok(course)
    }
}
