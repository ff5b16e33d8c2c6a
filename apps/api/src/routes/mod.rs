pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::suggestion::handlers as suggestion;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/register", post(users::handle_register))
        .route("/login", post(users::handle_login))
        .route("/profile", get(users::handle_profile))
        .route("/admin/users", get(users::handle_admin_users))
        .route("/admin/resumes", get(users::handle_admin_resumes))
        // Resume document
        .route("/resume/me", get(resume::handle_get_my_resume))
        .route("/resume/personal", put(resume::handle_update_personal))
        .route("/resume/education", post(resume::handle_add_education))
        .route(
            "/resume/education/:id",
            delete(resume::handle_delete_education),
        )
        .route("/resume/skills", put(resume::handle_update_skills))
        .route("/resume/projects", post(resume::handle_add_project))
        .route(
            "/resume/projects/:id",
            delete(resume::handle_delete_project),
        )
        .route("/resume/templates", get(resume::handle_list_templates))
        .route(
            "/resume/templates/:id/apply",
            post(resume::handle_apply_template),
        )
        // AI suggestions
        .route("/ai/suggest", post(suggestion::handle_suggest))
        // Jobs
        .route("/jobs", get(jobs::handle_list_jobs))
        .route("/jobs/suggest", post(jobs::handle_suggest_jobs))
        .route("/jobs/:id", get(jobs::handle_get_job))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::auth::jwt::JwtKeys;
    use crate::config::Config;
    use crate::jobs::JobBoard;
    use crate::llm_client::{CompletionProvider, CompletionRequest, LlmError};
    use crate::resume::memory::MemoryResumeStore;
    use crate::suggestion::service::SuggestionService;
    use crate::users::memory::MemoryUserStore;

    const ADMIN_EMAIL: &str = "admin@example.com";

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                body: json!({"error": {"message": "rate limited"}}),
            })
        }
    }

    struct MalformedEnvelopeProvider;

    #[async_trait]
    impl CompletionProvider for MalformedEnvelopeProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            let err = serde_json::from_str::<Value>("{\"choices\": [").unwrap_err();
            Err(LlmError::Parse(err))
        }
    }

    fn test_config() -> Config {
        Config {
            database_url: None,
            jwt_secret: "router-test-secret".to_string(),
            admin_email: Some(ADMIN_EMAIL.to_string()),
            openai_api_key: None,
            openai_api_url: "http://unused".to_string(),
            openai_model: "test-model".to_string(),
            provider_timeout: Duration::from_secs(1),
            job_api: None,
            cors_allowed_origins: Vec::new(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn app_with(provider: Option<Arc<dyn CompletionProvider>>) -> Router {
        let config = test_config();
        build_router(AppState {
            resumes: Arc::new(MemoryResumeStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            suggestions: SuggestionService::new(provider),
            jobs: JobBoard::new(None),
            jwt: JwtKeys::from_secret(&config.jwt_secret),
            config,
        })
    }

    fn app() -> Router {
        app_with(None)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router, email: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/register",
            None,
            Some(json!({
                "name": "Test User",
                "email": email,
                "password": "pass1234",
                "confirmPassword": "pass1234"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_resume_requires_token() {
        let app = app();
        let (status, body) = send(&app, "GET", "/resume/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) = send(&app, "GET", "/resume/me", Some("bogus"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_login_and_profile() {
        let app = app();
        register(&app, "Ada@Example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "ada@example.com", "password": "pass1234"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "user");
        let token = body["token"].as_str().unwrap().to_string();

        let (status, profile) = send(&app, "GET", "/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["email"], "ada@example.com");
        assert!(profile.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_and_login_validation() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"name": "A", "email": "a@example.com", "password": "x", "confirmPassword": "y"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Passwords do not match");

        let (status, body) =
            send(&app, "POST", "/register", None, Some(json!({"email": "a@example.com"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing fields");

        register(&app, "dup@example.com").await;
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"name": "B", "email": "dup@example.com", "password": "p", "confirmPassword": "p"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "User already exists");

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "dup@example.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid email or password");

        let (status, body) = send(&app, "POST", "/login", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing credentials");
    }

    #[tokio::test]
    async fn test_resume_documents_are_scoped_to_caller() {
        let app = app();
        let alice = register(&app, "alice@example.com").await;
        let bob = register(&app, "bob@example.com").await;

        let (status, projects) = send(
            &app,
            "POST",
            "/resume/projects",
            Some(&alice),
            Some(json!({"title": "Compiler", "techStack": ["Rust"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(projects.as_array().unwrap().len(), 1);

        let (_, bob_doc) = send(&app, "GET", "/resume/me", Some(&bob), None).await;
        assert!(bob_doc["projects"].as_array().unwrap().is_empty());

        let (_, alice_doc) = send(&app, "GET", "/resume/me", Some(&alice), None).await;
        assert_eq!(alice_doc["projects"][0]["title"], "Compiler");
    }

    #[tokio::test]
    async fn test_education_append_and_delete() {
        let app = app();
        let token = register(&app, "edu@example.com").await;

        let (_, list) = send(
            &app,
            "POST",
            "/resume/education",
            Some(&token),
            Some(json!({"school": "MIT", "startDate": "2018-09-01T00:00:00Z"})),
        )
        .await;
        let id = list[0]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "DELETE",
            "/resume/education/not-a-uuid",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/resume/education/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, doc) = send(&app, "GET", "/resume/me", Some(&token), None).await;
        assert!(doc["education"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_skills_and_template() {
        let app = app();
        let token = register(&app, "tpl@example.com").await;

        let (_, skills) = send(
            &app,
            "PUT",
            "/resume/skills",
            Some(&token),
            Some(json!({"skills": ["Rust", "SQL"]})),
        )
        .await;
        assert_eq!(skills, json!(["Rust", "SQL"]));

        let (_, templates) = send(&app, "GET", "/resume/templates", Some(&token), None).await;
        assert_eq!(templates.as_array().unwrap().len(), 3);

        let (status, applied) = send(
            &app,
            "POST",
            "/resume/templates/tpl2/apply",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(applied, json!({"success": true, "template": "tpl2"}));
    }

    #[tokio::test]
    async fn test_suggest_mock_and_validation() {
        let app = app();
        let token = register(&app, "ai@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/ai/suggest",
            Some(&token),
            Some(json!({"section": "project", "text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing text in request body");

        let (status, body) = send(
            &app,
            "POST",
            "/ai/suggest",
            Some(&token),
            Some(json!({"section": "project", "text": "built a chat app with websockets"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "mock");
        assert_eq!(body["suggestions"]["kind"], "structured");
    }

    #[tokio::test]
    async fn test_suggest_provider_failure_is_bad_gateway() {
        let app = app_with(Some(Arc::new(FailingProvider) as Arc<dyn CompletionProvider>));
        let token = register(&app, "fail@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/ai/suggest",
            Some(&token),
            Some(json!({"section": "summary", "text": "backend engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "AI provider error");
        assert_eq!(body["error"]["details"]["status"], 429);
    }

    #[tokio::test]
    async fn test_suggest_malformed_envelope_is_bad_gateway() {
        let app = app_with(Some(
            Arc::new(MalformedEnvelopeProvider) as Arc<dyn CompletionProvider>
        ));
        let token = register(&app, "malformed@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/ai/suggest",
            Some(&token),
            Some(json!({"section": "project", "text": "built a chat app"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
        assert_eq!(body["error"]["message"], "Invalid AI response format");
        assert!(body.get("suggestions").is_none());
        assert!(body.get("source").is_none());
    }

    #[tokio::test]
    async fn test_token_for_deleted_user_is_unauthorized() {
        let app = app();
        let token = JwtKeys::from_secret(&test_config().jwt_secret)
            .issue(Uuid::new_v4())
            .unwrap();

        let (status, body) = send(&app, "GET", "/resume/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Not authorized, user not found");
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin() {
        let app = app();
        let user = register(&app, "plain@example.com").await;
        let admin = register(&app, ADMIN_EMAIL).await;

        let (status, _) = send(&app, "GET", "/admin/users", Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, users) = send(&app, "GET", "/admin/users", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 2);

        send(&app, "GET", "/resume/me", Some(&user), None).await;
        let (status, resumes) = send(&app, "GET", "/admin/resumes", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resumes[0]["user"]["email"], "plain@example.com");
    }

    #[tokio::test]
    async fn test_jobs_fall_back_to_mock() {
        let app = app();
        let (status, page) = send(&app, "GET", "/jobs?results_per_page=2", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["count"], 3);
        assert_eq!(page["jobs"].as_array().unwrap().len(), 2);

        let (status, page) = send(
            &app,
            "POST",
            "/jobs/suggest",
            None,
            Some(json!({"skills": ["express"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["jobs"][0]["id"], "m2");

        let (status, body) = send(&app, "GET", "/jobs/missing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Job not found");
    }
}
