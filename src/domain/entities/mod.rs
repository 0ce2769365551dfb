pub mod analytics;
pub mod assignment;
pub mod certificate;
pub mod course;
pub mod discussion;
pub mod enrollment;
pub mod grade;
pub mod otp;
pub mod skill;
pub mod submission;
pub mod token;
pub mod user;
pub mod user_skill;
