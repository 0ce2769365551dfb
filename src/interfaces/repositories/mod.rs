pub mod analytics;
pub mod assignment;
pub mod catalog;
pub mod discussion;
pub mod enrollment;
pub mod otp;
pub mod sqlx_repo;
pub mod token;
pub mod user;
pub mod user_skill;
