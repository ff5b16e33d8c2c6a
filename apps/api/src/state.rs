use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::config::Config;
use crate::jobs::JobBoard;
use crate::resume::store::ResumeStore;
use crate::suggestion::service::SuggestionService;
use crate::users::store::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    pub users: Arc<dyn UserStore>,
    pub suggestions: SuggestionService,
    pub jobs: JobBoard,
    pub jwt: JwtKeys,
    pub config: Config,
}
