mod test_utils;

use reqwest::StatusCode;
use serde_json::{Value, json};

use test_utils::TestApp;

async fn post_thread(app: &TestApp, token: &str, title: &str, course_id: Option<&str>) -> Value {
    let mut body = json!({ "title": title, "body": "Opening post" });
    if let Some(course_id) = course_id {
        body["course_id"] = json!(course_id);
    }

    let response = app
        .client
        .post(app.url("/api/v1/discussions/threads"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

#[actix_rt::test]
async fn threads_require_login_but_reading_does_not() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/v1/discussions/threads"))
        .json(&json!({ "title": "Anonymous", "body": "hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .client
        .get(app.url("/api/v1/discussions/threads"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn threads_filter_by_course() {
    let app = TestApp::spawn().await;
    let instructor = app.instructor_token().await;
    let student = app.student_token().await;
    let course_id = app
        .published_course(&instructor.access_token, "Discussed Course")
        .await;

    post_thread(&app, &student.access_token, "General chat", None).await;
    post_thread(&app, &student.access_token, "Course question", Some(&course_id)).await;

    let filtered: Value = app
        .client
        .get(app.url(&format!(
            "/api/v1/discussions/threads?course_id={}",
            course_id
        )))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["title"], "Course question");
}

#[actix_rt::test]
async fn replies_are_listed_in_order() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;
    let thread = post_thread(&app, &student.access_token, "Replied", None).await;
    let thread_id = thread["id"].as_str().unwrap();

    for body in ["first", "second"] {
        let response = app
            .client
            .post(app.url(&format!("/api/v1/discussions/threads/{}/replies", thread_id)))
            .bearer_auth(&student.access_token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let replies: Value = app
        .client
        .get(app.url(&format!("/api/v1/discussions/threads/{}/replies", thread_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let replies = replies.as_array().unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["body"], "first");
    assert_eq!(replies[1]["body"], "second");
}

#[actix_rt::test]
async fn replying_to_a_missing_thread_is_404() {
    let app = TestApp::spawn().await;
    let student = app.student_token().await;

    let response = app
        .client
        .post(app.url(&format!(
            "/api/v1/discussions/threads/{}/replies",
            uuid::Uuid::new_v4()
        )))
        .bearer_auth(&student.access_token)
        .json(&json!({ "body": "into the void" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn only_author_or_admin_deletes_a_thread() {
    let app = TestApp::spawn().await;
    let author = app.student_token().await;
    let other = app.student_token().await;
    let admin = app.admin_token().await;

    let thread = post_thread(&app, &author.access_token, "Contested", None).await;
    let thread_id = thread["id"].as_str().unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/discussions/threads/{}", thread_id)))
        .bearer_auth(&other.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/discussions/threads/{}", thread_id)))
        .bearer_auth(&admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn deleting_a_thread_removes_its_replies() {
    let app = TestApp::spawn().await;
    let author = app.student_token().await;

    let thread = post_thread(&app, &author.access_token, "Short-lived", None).await;
    let thread_id = thread["id"].as_str().unwrap();

    app.client
        .post(app.url(&format!("/api/v1/discussions/threads/{}/replies", thread_id)))
        .bearer_auth(&author.access_token)
        .json(&json!({ "body": "soon gone" }))
        .send()
        .await
        .unwrap();

    app.client
        .delete(app.url(&format!("/api/v1/discussions/threads/{}", thread_id)))
        .bearer_auth(&author.access_token)
        .send()
        .await
        .unwrap();

    let replies: Value = app
        .client
        .get(app.url(&format!("/api/v1/discussions/threads/{}/replies", thread_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(replies.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn reply_author_can_delete_their_reply() {
    let app = TestApp::spawn().await;
    let author = app.student_token().await;
    let replier = app.student_token().await;

    let thread = post_thread(&app, &author.access_token, "Retracted", None).await;
    let thread_id = thread["id"].as_str().unwrap();

    let reply: Value = app
        .client
        .post(app.url(&format!("/api/v1/discussions/threads/{}/replies", thread_id)))
        .bearer_auth(&replier.access_token)
        .json(&json!({ "body": "on second thought" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // The thread author does not own the reply.
    let response = app
        .client
        .delete(app.url(&format!(
            "/api/v1/discussions/replies/{}",
            reply["id"].as_str().unwrap()
        )))
        .bearer_auth(&author.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .delete(app.url(&format!(
            "/api/v1/discussions/replies/{}",
            reply["id"].as_str().unwrap()
        )))
        .bearer_auth(&replier.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
