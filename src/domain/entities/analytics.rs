use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct AdminOverview {
    pub users: i64,
    pub published_courses: i64,
    pub draft_courses: i64,
    pub enrollments: EnrollmentCounts,
    pub submissions: i64,
    pub grades: i64,
    pub threads: i64,
    /// Mean grade points across all grades, rounded; 0 with no grades.
    pub average_grade_points: i64,
    pub uptime_seconds: i64,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentCounts {
    pub enrolled: i64,
    pub completed: i64,
    pub dropped: i64,
}

#[derive(Debug, Serialize)]
pub struct CourseReport {
    pub course_id: Uuid,
    pub enrollment_count: i64,
    pub assignments: Vec<AssignmentReportRow>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentReportRow {
    pub assignment_id: Uuid,
    pub title: String,
    pub submission_count: i64,
    pub average_points: i64,
}
