pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod discussion;
pub mod enrollment;
pub mod extractors;
pub mod grading;
pub mod user_skills;
