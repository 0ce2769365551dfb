mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, password, use_cases};
pub use infrastructure::{auth, db};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use repositories::sqlx_repo::{
    SqlxAnalyticsRepo, SqlxAssignmentRepo, SqlxCatalogRepo, SqlxDiscussionRepo,
    SqlxEnrollmentRepo, SqlxOtpRepo, SqlxUserRepo, SqlxUserSkillRepo,
};
use use_cases::analytics::AnalyticsHandler;
use use_cases::auth::AuthHandler;
use use_cases::catalog::CatalogHandler;
use use_cases::discussion::DiscussionHandler;
use use_cases::enrollment::EnrollmentHandler;
use use_cases::grading::GradingHandler;
use use_cases::user_skills::UserSkillHandler;

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, SqlxOtpRepo, JwtService>;
pub type AppCatalogHandler = CatalogHandler<SqlxCatalogRepo>;
pub type AppEnrollmentHandler = EnrollmentHandler<SqlxEnrollmentRepo, SqlxCatalogRepo>;
pub type AppGradingHandler =
    GradingHandler<SqlxAssignmentRepo, SqlxEnrollmentRepo, SqlxCatalogRepo>;
pub type AppDiscussionHandler = DiscussionHandler<SqlxDiscussionRepo>;
pub type AppUserSkillHandler = UserSkillHandler<SqlxUserSkillRepo>;
pub type AppAnalyticsHandler = AnalyticsHandler<SqlxAnalyticsRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub catalog_handler: AppCatalogHandler,
    pub enrollment_handler: AppEnrollmentHandler,
    pub grading_handler: AppGradingHandler,
    pub discussion_handler: AppDiscussionHandler,
    pub user_skill_handler: AppUserSkillHandler,
    pub analytics_handler: AppAnalyticsHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::SqlitePool) -> Self {
        let jwt_service = JwtService::new(config);

        AppState {
            auth_handler: AuthHandler::new(
                SqlxUserRepo::new(pool.clone()),
                SqlxOtpRepo::new(pool.clone()),
                jwt_service,
                config,
            ),
            catalog_handler: CatalogHandler::new(SqlxCatalogRepo::new(pool.clone())),
            enrollment_handler: EnrollmentHandler::new(
                SqlxEnrollmentRepo::new(pool.clone()),
                SqlxCatalogRepo::new(pool.clone()),
            ),
            grading_handler: GradingHandler::new(
                SqlxAssignmentRepo::new(pool.clone()),
                SqlxEnrollmentRepo::new(pool.clone()),
                SqlxCatalogRepo::new(pool.clone()),
            ),
            discussion_handler: DiscussionHandler::new(SqlxDiscussionRepo::new(pool.clone())),
            user_skill_handler: UserSkillHandler::new(SqlxUserSkillRepo::new(pool.clone())),
            analytics_handler: AnalyticsHandler::new(SqlxAnalyticsRepo::new(pool)),
        }
    }
}
