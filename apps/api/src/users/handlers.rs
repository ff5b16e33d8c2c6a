use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{AdminUser, AuthUser};
use crate::errors::AppError;
use crate::models::resume::{EducationEntry, PersonalInfo, ProjectEntry, ResumeDocument};
use crate::models::user::{User, UserSummary, ROLE_ADMIN, ROLE_USER, STATUS_ACTIVE};
use crate::state::AppState;
use crate::users::password::{hash_password, verify_password};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

/// A resume with its owner resolved, for admin listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResumeView {
    pub id: Uuid,
    pub user: Option<UserSummary>,
    pub personal: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub template: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminResumeView {
    fn new(doc: ResumeDocument, owner: Option<UserSummary>) -> Self {
        Self {
            id: doc.id,
            user: owner,
            personal: doc.personal,
            education: doc.education,
            skills: doc.skills,
            projects: doc.projects,
            template: doc.template,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (Some(name), Some(email), Some(password)) = (
        non_blank(req.name),
        non_blank(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation("Missing fields".to_string()));
    };

    if req.confirm_password.as_deref() != Some(password.as_str()) {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    let email = normalize_email(&email);
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Validation("User already exists".to_string()));
    }

    let role = if state.config.is_admin_email(&email) {
        ROLE_ADMIN
    } else {
        ROLE_USER
    };

    let user = User {
        id: Uuid::new_v4(),
        name,
        email,
        password_hash: hash_password(password).await?,
        role: role.to_string(),
        status: non_blank(req.status).unwrap_or_else(|| STATUS_ACTIVE.to_string()),
        created_at: Utc::now(),
    };
    let user = state.users.insert(user).await?;
    info!("Registered user {} ({})", user.id, user.role);

    let token = state.jwt.issue(user.id)?;
    Ok((StatusCode::CREATED, Json(auth_response(user, token))))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (Some(email), Some(password)) = (non_blank(req.email), req.password.filter(|p| !p.is_empty()))
    else {
        return Err(AppError::Validation("Missing credentials".to_string()));
    };

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let email = normalize_email(&email);
    let user = state.users.find_by_email(&email).await?.ok_or_else(invalid)?;
    if !verify_password(password, user.password_hash.clone()).await? {
        warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    let token = state.jwt.issue(user.id)?;
    Ok(Json(auth_response(user, token)))
}

/// GET /profile
pub async fn handle_profile(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// GET /admin/users
pub async fn handle_admin_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list_all().await?))
}

/// GET /admin/resumes
pub async fn handle_admin_resumes(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminResumeView>>, AppError> {
    let owners: HashMap<Uuid, UserSummary> = state
        .users
        .list_all()
        .await?
        .iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();

    let resumes = state
        .resumes
        .list_all()
        .await?
        .into_iter()
        .map(|doc| {
            let owner = owners.get(&doc.user).cloned();
            AdminResumeView::new(doc, owner)
        })
        .collect();
    Ok(Json(resumes))
}

fn auth_response(user: User, token: String) -> AuthResponse {
    AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        token,
    }
}
