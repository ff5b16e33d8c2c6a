use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Free-text personal block. Every field is optional at the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: Uuid,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Client payload for a new education entry. Any `id` sent by the client is
/// ignored; the store assigns one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEducation {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl NewEducation {
    pub fn into_entry(self) -> EducationEntry {
        EducationEntry {
            id: Uuid::new_v4(),
            school: self.school,
            degree: self.degree,
            field: self.field,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub title: Option<String>,
    pub link: Option<String>,
    pub tech_stack: Vec<String>,
    pub summary: Option<String>,
}

impl NewProject {
    pub fn into_entry(self) -> ProjectEntry {
        ProjectEntry {
            id: Uuid::new_v4(),
            title: self.title,
            link: self.link,
            tech_stack: self.tech_stack,
            summary: self.summary,
        }
    }
}

/// The per-user resume aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub id: Uuid,
    pub user: Uuid,
    pub personal: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub template: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeDocument {
    /// Empty skeleton for a user's first access.
    pub fn empty(user: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user,
            personal: PersonalInfo::default(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            template: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub personal: Json<PersonalInfo>,
    pub education: Json<Vec<EducationEntry>>,
    pub skills: Vec<String>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub template: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeDocument {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            personal: row.personal.0,
            education: row.education.0,
            skills: row.skills,
            projects: row.projects.0,
            template: row.template,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Entry of the fixed template catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
}
