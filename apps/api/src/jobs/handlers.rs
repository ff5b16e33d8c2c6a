use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::{Job, JobPage, SearchQuery, DEFAULT_LOCATION, DEFAULT_RESULTS_PER_PAGE};
use crate::state::AppState;

/// Query values are parsed leniently: anything that is not a positive
/// integer falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub page: Option<String>,
    pub q: Option<String>,
    pub location: Option<String>,
    pub results_per_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestJobsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// GET /jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> Json<JobPage> {
    let query = SearchQuery {
        page: positive_or(params.page.as_deref(), 1),
        what: params.q.unwrap_or_default(),
        location: params
            .location
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        results_per_page: positive_or(params.results_per_page.as_deref(), DEFAULT_RESULTS_PER_PAGE),
    };
    Json(state.jobs.search(query).await)
}

/// POST /jobs/suggest
pub async fn handle_suggest_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
    body: Option<Json<SuggestJobsRequest>>,
) -> Json<JobPage> {
    let skills = body.map(|Json(req)| req.skills).unwrap_or_default();
    let page = positive_or(params.page.as_deref(), 1);
    let per_page = positive_or(params.results_per_page.as_deref(), DEFAULT_RESULTS_PER_PAGE);
    Json(state.jobs.suggest(&skills, page, per_page).await)
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    state
        .jobs
        .find(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}
