use uuid::Uuid;

use crate::entities::analytics::{AdminOverview, CourseReport};
use crate::errors::AppError;
use crate::repositories::analytics::AnalyticsRepository;
use crate::use_cases::extractors::AuthContext;

pub struct AnalyticsHandler<R>
where
    R: AnalyticsRepository,
{
    pub analytics_repo: R,
}

impl<R> AnalyticsHandler<R>
where
    R: AnalyticsRepository,
{
    pub fn new(analytics_repo: R) -> Self {
        AnalyticsHandler { analytics_repo }
    }

    pub async fn overview(&self, ctx: &AuthContext) -> Result<AdminOverview, AppError> {
        ctx.require_admin()?;
        self.analytics_repo.overview().await
    }

    pub async fn course_report(
        &self,
        ctx: &AuthContext,
        course_id: &Uuid,
    ) -> Result<CourseReport, AppError> {
        ctx.require_admin()?;
        self.analytics_repo.course_report(course_id).await
    }
}
