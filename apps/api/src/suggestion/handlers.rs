use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestion::service::{SuggestionRequest, SuggestionResult};

/// POST /ai/suggest
pub async fn handle_suggest(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResult>, AppError> {
    tracing::debug!("Suggestion requested by user {}", auth.id());
    let result = state.suggestions.suggest(req).await?;
    Ok(Json(result))
}
