mod test_utils;

use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use test_utils::TestApp;

async fn me_id(app: &TestApp, token: &str) -> String {
    let me: Value = app
        .client
        .get(app.url("/api/v1/users/me"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    me["id"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn submission_requires_active_enrollment() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Gated Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Gated Task")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();

    let response = app
        .submit(&student.access_token, assignment_id, "no enrollment")
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.enroll(&student.access_token, &course_id).await;
    let response = app
        .submit(&student.access_token, assignment_id, "now enrolled")
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn dropped_students_cannot_submit() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Dropout Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Late Task")
        .await;

    let enrollment: Value = app
        .enroll(&student.access_token, &course_id)
        .await
        .json()
        .await
        .unwrap();
    app.client
        .post(app.url(&format!(
            "/api/v1/enrollments/{}/drop",
            enrollment["id"].as_str().unwrap()
        )))
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap();

    let response = app
        .submit(
            &student.access_token,
            assignment["id"].as_str().unwrap(),
            "too late",
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn resubmission_overwrites_in_place() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Rewrite Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Essay")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();

    app.enroll(&student.access_token, &course_id).await;
    let first: Value = app
        .submit(&student.access_token, assignment_id, "draft one")
        .await
        .json()
        .await
        .unwrap();
    let second: Value = app
        .submit(&student.access_token, assignment_id, "draft two")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["content"], "draft two");

    let submissions: Value = app
        .client
        .get(app.url(&format!("/api/v1/assignments/{}/submissions", assignment_id)))
        .bearer_auth(&instructor.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(submissions.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn past_due_submissions_are_rejected() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Expired Course")
        .await;

    let due = Utc::now() - Duration::hours(1);
    let assignment: Value = app
        .client
        .post(app.url(&format!("/api/v1/courses/{}/assignments", course_id)))
        .bearer_auth(&instructor.access_token)
        .json(&json!({ "title": "Overdue", "due_date": due, "max_points": 10 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    app.enroll(&student.access_token, &course_id).await;
    let response = app
        .submit(
            &student.access_token,
            assignment["id"].as_str().unwrap(),
            "too late",
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "due_date");
}

#[actix_rt::test]
async fn grading_requires_a_submission() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let admin = app.admin_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Empty Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Ungraded")
        .await;

    let response = app
        .client
        .post(app.url(&format!(
            "/api/v1/assignments/{}/grades",
            assignment["id"].as_str().unwrap()
        )))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "user_id": Uuid::new_v4(), "points": 5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn regrade_overwrites_previous_grade() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let admin = app.admin_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Regrade Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Quiz")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();
    let student_id = me_id(&app, &student.access_token).await;

    app.enroll(&student.access_token, &course_id).await;
    app.submit(&student.access_token, assignment_id, "answers").await;

    let grade_url = app.url(&format!("/api/v1/assignments/{}/grades", assignment_id));
    let first: Value = app
        .client
        .post(&grade_url)
        .bearer_auth(&admin.access_token)
        .json(&json!({ "user_id": student_id, "points": 60 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Value = app
        .client
        .post(&grade_url)
        .bearer_auth(&admin.access_token)
        .json(&json!({ "user_id": student_id, "points": 85, "feedback": "better" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["points"], 85);

    let mine: Value = app
        .client
        .get(app.url("/api/v1/users/me/submissions"))
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine[0]["points"], 85);
    assert_eq!(mine[0]["feedback"], "better");
}

#[actix_rt::test]
async fn points_must_stay_within_bounds() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let admin = app.admin_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Bounded Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Bounded")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();
    let student_id = me_id(&app, &student.access_token).await;

    app.enroll(&student.access_token, &course_id).await;
    app.submit(&student.access_token, assignment_id, "answers").await;

    let grade_url = app.url(&format!("/api/v1/assignments/{}/grades", assignment_id));
    for points in [-1, 101] {
        let response = app
            .client
            .post(&grade_url)
            .bearer_auth(&admin.access_token)
            .json(&json!({ "user_id": student_id, "points": points }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing landed from the rejected attempts.
    let mine: Value = app
        .client
        .get(app.url("/api/v1/users/me/submissions"))
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine[0]["points"], Value::Null);

    // Both boundaries are valid scores.
    for points in [0, 100] {
        let response = app
            .client
            .post(&grade_url)
            .bearer_auth(&admin.access_token)
            .json(&json!({ "user_id": student_id, "points": points }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let grade: Value = response.json().await.unwrap();
        assert_eq!(grade["points"], points);
    }
}

#[actix_rt::test]
async fn bulk_grading_is_all_or_nothing() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let admin = app.admin_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Batch Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Batch Quiz")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();
    let student_id = me_id(&app, &student.access_token).await;

    app.enroll(&student.access_token, &course_id).await;
    app.submit(&student.access_token, assignment_id, "answers").await;

    // The second entry has no submission, so the first must not land either.
    let response = app
        .client
        .post(app.url(&format!("/api/v1/assignments/{}/grades/bulk", assignment_id)))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "grades": [
            { "user_id": student_id, "points": 90 },
            { "user_id": Uuid::new_v4(), "points": 70 }
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mine: Value = app
        .client
        .get(app.url("/api/v1/users/me/submissions"))
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine[0]["points"], Value::Null);

    let response = app
        .client
        .post(app.url(&format!("/api/v1/assignments/{}/grades/bulk", assignment_id)))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "grades": [{ "user_id": student_id, "points": 90 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let grades: Value = response.json().await.unwrap();
    assert_eq!(grades.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn grading_is_admin_only() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "No Instructor Grades")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Task")
        .await;

    let response = app
        .client
        .post(app.url(&format!(
            "/api/v1/assignments/{}/grades",
            assignment["id"].as_str().unwrap()
        )))
        .bearer_auth(&instructor.access_token)
        .json(&json!({ "user_id": Uuid::new_v4(), "points": 5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn stats_aggregate_submissions_and_grades() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let admin = app.admin_token().await;
    let s1 = app.student_token().await;
    let s2 = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Stats Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Stats Quiz")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();
    let s1_id = me_id(&app, &s1.access_token).await;

    app.enroll(&s1.access_token, &course_id).await;
    app.enroll(&s2.access_token, &course_id).await;
    app.submit(&s1.access_token, assignment_id, "only submitter").await;

    app.client
        .post(app.url(&format!("/api/v1/assignments/{}/grades", assignment_id)))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "user_id": s1_id, "points": 80 }))
        .send()
        .await
        .unwrap();

    let stats: Value = app
        .client
        .get(app.url(&format!("/api/v1/assignments/{}/stats", assignment_id)))
        .bearer_auth(&instructor.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["submission_count"], 1);
    assert_eq!(stats["graded_count"], 1);
    assert_eq!(stats["average_points"], 80);
    assert_eq!(stats["submission_rate"], 50);
}
