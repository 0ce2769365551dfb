use std::net::TcpListener;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware::NormalizePath, web};
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing_actix_web::TracingLogger;
use uuid::Uuid;

use skillportal_backend::{
    AppState,
    auth::password::hash_password,
    db::sqlite::{create_pool, run_migrations},
    entities::token::AuthResponse,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
};

pub const TEST_PASSWORD: &str = "tr4versal!Quartz#9";

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub client: Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = test_config();

        let db_pool = create_pool(&config.database_url)
            .await
            .expect("Failed to create test DB pool");

        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let app_state = web::Data::new(AppState::new(&config, db_pool.clone()));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .wrap(NormalizePath::trim())
                .wrap(AuthMiddleware)
                .wrap(TracingLogger::default())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(1)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            address,
            db_pool,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register(&self, email: &str, name: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to register user")
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResponse {
        let response = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to login user");

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            panic!("Login failed ({}): {}", status, body);
        }

        response.json().await.expect("Failed to parse login response")
    }

    /// Full self-service onboarding: register, verify with the echoed
    /// code, log in.
    pub async fn signup_student(&self, email: &str) -> AuthResponse {
        let response = self.register(email, "Test Student", TEST_PASSWORD).await;
        assert!(
            response.status().is_success(),
            "registration failed: {}",
            response.status()
        );

        let body: Value = response.json().await.unwrap();
        let code = body["debug_otp"]
            .as_str()
            .expect("debug_otp missing from testing-mode response")
            .to_string();

        let verify = self
            .client
            .post(self.url("/api/v1/auth/verify-otp"))
            .json(&json!({ "email": email, "code": code }))
            .send()
            .await
            .unwrap();
        assert!(verify.status().is_success(), "OTP verify failed");

        self.login(email, TEST_PASSWORD).await
    }

    /// Elevated accounts are provisioned out of band, so tests insert
    /// them straight into the database.
    pub async fn seed_user(&self, email: &str, role: &str, verified: bool) -> Uuid {
        let id = Uuid::new_v4();
        let password_hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, role, is_verified, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind("Seeded User")
        .bind(password_hash)
        .bind(role)
        .bind(verified)
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed user");

        id
    }

    pub async fn admin_token(&self) -> AuthResponse {
        let email = format!("admin-{}@example.com", Uuid::new_v4());
        self.seed_user(&email, "admin", true).await;
        self.login(&email, TEST_PASSWORD).await
    }

    pub async fn instructor_token(&self) -> AuthResponse {
        let email = format!("instructor-{}@example.com", Uuid::new_v4());
        self.seed_user(&email, "instructor", true).await;
        self.login(&email, TEST_PASSWORD).await
    }

    pub async fn student_token(&self) -> AuthResponse {
        let email = format!("student-{}@example.com", Uuid::new_v4());
        self.signup_student(&email).await
    }

    pub async fn create_course(&self, token: &str, title: &str) -> Value {
        let response = self
            .client
            .post(self.url("/api/v1/courses"))
            .bearer_auth(token)
            .json(&json!({ "title": title }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.unwrap()
    }

    pub async fn publish_course(&self, token: &str, course_id: &str) {
        let response = self
            .client
            .post(self.url(&format!("/api/v1/courses/{}/publish", course_id)))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    pub async fn published_course(&self, token: &str, title: &str) -> String {
        let course = self.create_course(token, title).await;
        let course_id = course["id"].as_str().unwrap().to_string();
        self.publish_course(token, &course_id).await;
        course_id
    }

    /// Creates an assignment due one day from now.
    pub async fn create_assignment(&self, token: &str, course_id: &str, title: &str) -> Value {
        let due = Utc::now() + ChronoDuration::days(1);
        let response = self
            .client
            .post(self.url(&format!("/api/v1/courses/{}/assignments", course_id)))
            .bearer_auth(token)
            .json(&json!({ "title": title, "due_date": due, "max_points": 100 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.unwrap()
    }

    pub async fn enroll(&self, token: &str, course_id: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/enrollments"))
            .bearer_auth(token)
            .json(&json!({ "course_id": course_id }))
            .send()
            .await
            .unwrap()
    }

    pub async fn submit(&self, token: &str, assignment_id: &str, content: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/api/v1/assignments/{}/submissions", assignment_id)))
            .bearer_auth(token)
            .json(&json!({ "content": content }))
            .send()
            .await
            .unwrap()
    }
}

fn test_config() -> AppConfig {
    let db_path = std::env::temp_dir().join(format!("skillportal-test-{}.db", Uuid::new_v4()));

    AppConfig {
        env: AppEnvironment::Testing,
        name: "Skill Portal Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: format!("sqlite://{}", db_path.display()),
        cors_allowed_origins: vec!["*".to_string()],
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_minutes: 15,
        refresh_token_secret: "test_refresh_secret_that_is_long_enough_1234567890".into(),
        refresh_token_exp_days: 1,
        otp_expiration_minutes: 5,
        otp_resend_expiration_minutes: 1,
    }
}
