use uuid::Uuid;
use validator::Validate;

use crate::entities::user_skill::{SetSkillLevelRequest, UserSkill};
use crate::errors::AppError;
use crate::repositories::user_skill::UserSkillRepository;
use crate::use_cases::extractors::AuthContext;

pub struct UserSkillHandler<R>
where
    R: UserSkillRepository,
{
    pub user_skill_repo: R,
}

impl<R> UserSkillHandler<R>
where
    R: UserSkillRepository,
{
    pub fn new(user_skill_repo: R) -> Self {
        UserSkillHandler { user_skill_repo }
    }

    /// Self-reported level, upserted per (user, skill).
    pub async fn set_level(
        &self,
        ctx: &AuthContext,
        request: SetSkillLevelRequest,
    ) -> Result<UserSkill, AppError> {
        request.validate()?;
        self.user_skill_repo
            .set_level(&ctx.user_id, &request.skill_id, request.level)
            .await
    }

    pub async fn list_mine(&self, ctx: &AuthContext) -> Result<Vec<UserSkill>, AppError> {
        self.user_skill_repo.list_for_user(&ctx.user_id).await
    }

    pub async fn remove(&self, ctx: &AuthContext, skill_id: &Uuid) -> Result<(), AppError> {
        self.user_skill_repo.remove(&ctx.user_id, skill_id).await
    }
}
