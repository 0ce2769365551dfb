mod test_utils;

use reqwest::StatusCode;
use serde_json::{Value, json};

use test_utils::TestApp;

async fn seed_skill(app: &TestApp, name: &str) -> String {
    let admin = app.admin_token().await;
    let skill: Value = app
        .client
        .post(app.url("/api/v1/skills"))
        .bearer_auth(&admin.access_token)
        .json(&json!({ "name": name, "category": "Programming" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    skill["id"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn setting_a_level_upserts() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;
    let skill_id = seed_skill(&app, "Rust").await;

    let url = app.url("/api/v1/users/me/skills");
    let first: Value = app
        .client
        .put(&url)
        .bearer_auth(&student.access_token)
        .json(&json!({ "skill_id": skill_id, "level": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["level"], 3);

    let second: Value = app
        .client
        .put(&url)
        .bearer_auth(&student.access_token)
        .json(&json!({ "skill_id": skill_id, "level": 7 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["level"], 7);

    let mine: Value = app
        .client
        .get(&url)
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn level_must_be_between_1_and_10() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;
    let skill_id = seed_skill(&app, "Go").await;

    let response = app
        .client
        .put(app.url("/api/v1/users/me/skills"))
        .bearer_auth(&student.access_token)
        .json(&json!({ "skill_id": skill_id, "level": 11 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn unknown_skill_is_rejected() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;

    let response = app
        .client
        .put(app.url("/api/v1/users/me/skills"))
        .bearer_auth(&student.access_token)
        .json(&json!({ "skill_id": uuid::Uuid::new_v4(), "level": 5 }))
        .send()
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn removing_a_skill_level() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;
    let skill_id = seed_skill(&app, "Kubernetes").await;

    app.client
        .put(app.url("/api/v1/users/me/skills"))
        .bearer_auth(&student.access_token)
        .json(&json!({ "skill_id": skill_id, "level": 4 }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/users/me/skills/{}", skill_id)))
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let mine: Value = app
        .client
        .get(app.url("/api/v1/users/me/skills"))
        .bearer_auth(&student.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(mine.as_array().unwrap().is_empty());
}
