use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{
    EducationEntry, NewEducation, NewProject, PersonalInfo, ProjectEntry, ResumeDocument,
    TemplateInfo,
};
use crate::resume::templates::list_template_catalog;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct TemplateAppliedResponse {
    pub success: bool,
    pub template: String,
}

/// GET /resume/me
pub async fn handle_get_my_resume(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state.resumes.get_or_create(auth.id()).await?;
    Ok(Json(doc))
}

/// PUT /resume/personal
pub async fn handle_update_personal(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(personal): Json<PersonalInfo>,
) -> Result<Json<PersonalInfo>, AppError> {
    let stored = state.resumes.replace_personal(auth.id(), personal).await?;
    info!("Updated personal info for user {}", auth.id());
    Ok(Json(stored))
}

/// POST /resume/education
pub async fn handle_add_education(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NewEducation>,
) -> Result<Json<Vec<EducationEntry>>, AppError> {
    let entry = input.into_entry();
    debug!("Appending education {} for user {}", entry.id, auth.id());
    let list = state.resumes.append_education(auth.id(), entry).await?;
    Ok(Json(list))
}

/// DELETE /resume/education/:id
///
/// Unknown or malformed ids match nothing and still succeed.
pub async fn handle_delete_education(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if let Ok(entry_id) = Uuid::parse_str(&id) {
        state.resumes.remove_education(auth.id(), entry_id).await?;
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// PUT /resume/skills
pub async fn handle_update_skills(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SkillsRequest>,
) -> Result<Json<Vec<String>>, AppError> {
    let skills = state.resumes.replace_skills(auth.id(), req.skills).await?;
    Ok(Json(skills))
}

/// POST /resume/projects
pub async fn handle_add_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NewProject>,
) -> Result<Json<Vec<ProjectEntry>>, AppError> {
    let entry = input.into_entry();
    debug!("Appending project {} for user {}", entry.id, auth.id());
    let list = state.resumes.append_project(auth.id(), entry).await?;
    Ok(Json(list))
}

/// DELETE /resume/projects/:id
pub async fn handle_delete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if let Ok(entry_id) = Uuid::parse_str(&id) {
        state.resumes.remove_project(auth.id(), entry_id).await?;
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /resume/templates
pub async fn handle_list_templates(_auth: AuthUser) -> Json<&'static [TemplateInfo]> {
    Json(list_template_catalog())
}

/// POST /resume/templates/:id/apply
///
/// The id is stored as given; it is not checked against the catalog.
pub async fn handle_apply_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<TemplateAppliedResponse>, AppError> {
    let template = state.resumes.set_template(auth.id(), template_id).await?;
    info!("User {} applied template {template}", auth.id());
    Ok(Json(TemplateAppliedResponse {
        success: true,
        template,
    }))
}
