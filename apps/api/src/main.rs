mod auth;
mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod suggestion;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::jwt::JwtKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::client::JobSearchClient;
use crate::jobs::JobBoard;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::resume::memory::MemoryResumeStore;
use crate::resume::store::{PgResumeStore, ResumeStore};
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestion::service::SuggestionService;
use crate::users::memory::MemoryUserStore;
use crate::users::store::{PgUserStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillSync API v{}", env!("CARGO_PKG_VERSION"));

    // Stores: PostgreSQL when configured, otherwise in-memory
    let (resumes, users): (Arc<dyn ResumeStore>, Arc<dyn UserStore>) = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            let resumes: Arc<dyn ResumeStore> = Arc::new(PgResumeStore::new(pool.clone()));
            let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
            (resumes, users)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory stores (data is lost on restart)");
            let resumes: Arc<dyn ResumeStore> = Arc::new(MemoryResumeStore::new());
            let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
            (resumes, users)
        }
    };

    // Completion provider: absent key selects the offline mock mode
    let provider: Option<Arc<dyn CompletionProvider>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.openai_api_url.clone(),
                config.openai_model.clone(),
                config.provider_timeout,
            )?;
            info!(
                "LLM client initialized (model: {}, timeout: {:?})",
                client.model(),
                config.provider_timeout
            );
            Some(Arc::new(client) as Arc<dyn CompletionProvider>)
        }
        None => None,
    };

    let job_client = match &config.job_api {
        Some(job_api) => {
            info!("Job search provider configured at {}", job_api.base_url);
            Some(JobSearchClient::new(job_api.clone())?)
        }
        None => {
            info!("Job API not configured, serving mock listings");
            None
        }
    };

    let suggestions = SuggestionService::new(provider);
    info!(
        "Suggestion mode: {}",
        if suggestions.is_external() { "external" } else { "mock" }
    );

    // Build app state
    let state = AppState {
        resumes,
        users,
        suggestions,
        jobs: JobBoard::new(job_client),
        jwt: JwtKeys::from_secret(&config.jwt_secret),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Permissive when no origins are configured; otherwise an allow-list with
/// credentials so the `token` cookie is sent cross-origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
