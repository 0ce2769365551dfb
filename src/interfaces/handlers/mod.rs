pub mod admin;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod discussions;
pub mod enrollments;
pub mod home;
pub mod json_error;
pub mod skills;
pub mod users;
