use uuid::Uuid;
use validator::Validate;

use crate::entities::discussion::{
    DiscussionReply, DiscussionThread, NewReplyRequest, NewThreadRequest,
};
use crate::errors::AppError;
use crate::repositories::discussion::DiscussionRepository;
use crate::use_cases::extractors::AuthContext;

pub struct DiscussionHandler<R>
where
    R: DiscussionRepository,
{
    pub discussion_repo: R,
}

impl<R> DiscussionHandler<R>
where
    R: DiscussionRepository,
{
    pub fn new(discussion_repo: R) -> Self {
        DiscussionHandler { discussion_repo }
    }

    pub async fn create_thread(
        &self,
        ctx: &AuthContext,
        request: NewThreadRequest,
    ) -> Result<DiscussionThread, AppError> {
        request.validate()?;
        self.discussion_repo
            .create_thread(
                &ctx.user_id,
                request.course_id.as_ref(),
                &request.title,
                &request.body,
            )
            .await
    }

    pub async fn create_reply(
        &self,
        ctx: &AuthContext,
        thread_id: &Uuid,
        request: NewReplyRequest,
    ) -> Result<DiscussionReply, AppError> {
        request.validate()?;
        self.discussion_repo
            .create_reply(thread_id, &ctx.user_id, &request.body)
            .await
    }

    pub async fn list_threads(
        &self,
        course_id: Option<&Uuid>,
    ) -> Result<Vec<DiscussionThread>, AppError> {
        self.discussion_repo.list_threads(course_id).await
    }

    pub async fn list_replies(&self, thread_id: &Uuid) -> Result<Vec<DiscussionReply>, AppError> {
        self.discussion_repo.list_replies(thread_id).await
    }

    /// Admin or original author; replies go with the thread atomically.
    pub async fn delete_thread(&self, ctx: &AuthContext, thread_id: &Uuid) -> Result<(), AppError> {
        let thread = self
            .discussion_repo
            .get_thread(thread_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Thread not found".to_string()))?;

        if !ctx.owns_or_admin(&thread.author_id) {
            return Err(AppError::ForbiddenAccess);
        }

        self.discussion_repo.delete_thread(thread_id).await
    }

    /// Admin or original author.
    pub async fn delete_reply(&self, ctx: &AuthContext, reply_id: &Uuid) -> Result<(), AppError> {
        let reply = self
            .discussion_repo
            .get_reply(reply_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reply not found".to_string()))?;

        if !ctx.owns_or_admin(&reply.author_id) {
            return Err(AppError::ForbiddenAccess);
        }

        self.discussion_repo.delete_reply(reply_id).await
    }
}
