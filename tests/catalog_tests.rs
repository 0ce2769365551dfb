mod test_utils;

use reqwest::StatusCode;
use serde_json::{Value, json};

use test_utils::TestApp;

#[actix_rt::test]
async fn skill_listing_is_public() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/api/v1/skills")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body.is_array());
}

#[actix_rt::test]
async fn only_admins_manage_skills() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;

    let response = app
        .client
        .post(app.url("/api/v1/skills"))
        .bearer_auth(&student.access_token)
        .json(&json!({ "name": "Rust", "category": "Programming" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let response = app
        .client
        .post(app.url("/api/v1/skills"))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "name": "Rust", "category": "Programming" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let skill: Value = response.json().await.unwrap();
    assert_eq!(skill["name"], "Rust");
}

#[actix_rt::test]
async fn skill_update_and_delete() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let skill: Value = app
        .client
        .post(app.url("/api/v1/skills"))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "name": "SQL", "category": "Databases" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let skill_id = skill["id"].as_str().unwrap();

    let updated: Value = app
        .client
        .patch(app.url(&format!("/api/v1/skills/{}", skill_id)))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "description": "Relational querying" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["description"], "Relational querying");
    assert_eq!(updated["name"], "SQL");

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/skills/{}", skill_id)))
        .bearer_auth(&admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .client
        .get(app.url(&format!("/api/v1/skills/{}", skill_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn students_cannot_create_courses() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;

    let response = app
        .client
        .post(app.url("/api/v1/courses"))
        .bearer_auth(&student.access_token)
        .json(&json!({ "title": "Intro to Rust" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn drafts_are_hidden_until_published() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;

    let course = app.create_course(&instructor.access_token, "Hidden Draft").await;
    let course_id = course["id"].as_str().unwrap();

    // Anonymous readers see neither the listing entry nor the detail.
    let listing: Value = app
        .client
        .get(app.url("/api/v1/courses"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(
        listing
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["id"] != course["id"])
    );

    let response = app
        .client
        .get(app.url(&format!("/api/v1/courses/{}", course_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner still sees their own draft.
    let response = app
        .client
        .get(app.url(&format!("/api/v1/courses/{}", course_id)))
        .bearer_auth(&instructor.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    app.publish_course(&instructor.access_token, course_id).await;

    let response = app
        .client
        .get(app.url(&format!("/api/v1/courses/{}", course_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["published_at"].is_string());
}

#[actix_rt::test]
async fn only_owner_or_admin_mutates_a_course() {
    let app = TestApp::spawn().await;
    let owner = app.instructor_token().await;
    let other = app.instructor_token().await;
    let admin = app.admin_token().await;

    let course = app.create_course(&owner.access_token, "Ownership").await;
    let course_id = course["id"].as_str().unwrap();

    let response = app
        .client
        .patch(app.url(&format!("/api/v1/courses/{}", course_id)))
        .bearer_auth(&other.access_token)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .patch(app.url(&format!("/api/v1/courses/{}", course_id)))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "title": "Renamed by Admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Renamed by Admin");
}

#[actix_rt::test]
async fn deleting_a_course_cascades() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Doomed Course")
        .await;
    let assignment = app
        .create_assignment(&instructor.access_token, &course_id, "Doomed Task")
        .await;
    let assignment_id = assignment["id"].as_str().unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/courses/{}", course_id)))
        .bearer_auth(&instructor.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .client
        .get(app.url(&format!("/api/v1/assignments/{}", assignment_id)))
        .bearer_auth(&instructor.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
