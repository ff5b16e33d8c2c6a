//! Resume document store — one document per user, sub-resource mutations.
//!
//! Every mutation is a single statement against the user's row so that
//! appends and removals are atomic per document. Writes upsert: a user who
//! has never read their resume still gets one on first write.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    EducationEntry, PersonalInfo, ProjectEntry, ResumeDocument, ResumeRow,
};

/// Persistence port for resume documents.
///
/// Carried in `AppState` as `Arc<dyn ResumeStore>`. Callers pass the
/// authenticated user's id; nothing here accepts a client-supplied owner.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Returns the user's document, creating an empty one if absent.
    async fn get_or_create(&self, user_id: Uuid) -> Result<ResumeDocument, AppError>;

    async fn replace_personal(
        &self,
        user_id: Uuid,
        personal: PersonalInfo,
    ) -> Result<PersonalInfo, AppError>;

    /// Appends and returns the full updated list.
    async fn append_education(
        &self,
        user_id: Uuid,
        entry: EducationEntry,
    ) -> Result<Vec<EducationEntry>, AppError>;

    /// Removes the entry with `entry_id`. Unknown ids are a no-op.
    async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError>;

    async fn replace_skills(
        &self,
        user_id: Uuid,
        skills: Vec<String>,
    ) -> Result<Vec<String>, AppError>;

    async fn append_project(
        &self,
        user_id: Uuid,
        entry: ProjectEntry,
    ) -> Result<Vec<ProjectEntry>, AppError>;

    async fn remove_project(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError>;

    async fn set_template(&self, user_id: Uuid, template: String) -> Result<String, AppError>;

    /// Every document, oldest first. Admin only.
    async fn list_all(&self) -> Result<Vec<ResumeDocument>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn get_or_create(&self, user_id: Uuid) -> Result<ResumeDocument, AppError> {
        let created = sqlx::query(
            "INSERT INTO resumes (id, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if created.rows_affected() > 0 {
            info!("Created empty resume for user {user_id}");
        }

        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn replace_personal(
        &self,
        user_id: Uuid,
        personal: PersonalInfo,
    ) -> Result<PersonalInfo, AppError> {
        let stored: Json<PersonalInfo> = sqlx::query_scalar(
            r#"
            INSERT INTO resumes (id, user_id, personal) VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET personal = EXCLUDED.personal, updated_at = now()
            RETURNING personal
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(&personal))
        .fetch_one(&self.pool)
        .await?;
        Ok(stored.0)
    }

    async fn append_education(
        &self,
        user_id: Uuid,
        entry: EducationEntry,
    ) -> Result<Vec<EducationEntry>, AppError> {
        let stored: Json<Vec<EducationEntry>> = sqlx::query_scalar(
            r#"
            INSERT INTO resumes (id, user_id, education) VALUES ($1, $2, jsonb_build_array($3::jsonb))
            ON CONFLICT (user_id) DO UPDATE
                SET education = resumes.education || jsonb_build_array($3::jsonb),
                    updated_at = now()
            RETURNING education
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(&entry))
        .fetch_one(&self.pool)
        .await?;
        Ok(stored.0)
    }

    async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE resumes
            SET education = COALESCE(
                    (SELECT jsonb_agg(e ORDER BY ord)
                     FROM jsonb_array_elements(education) WITH ORDINALITY AS t(e, ord)
                     WHERE e->>'id' <> $2),
                    '[]'::jsonb),
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(entry_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace_skills(
        &self,
        user_id: Uuid,
        skills: Vec<String>,
    ) -> Result<Vec<String>, AppError> {
        let stored: Vec<String> = sqlx::query_scalar(
            r#"
            INSERT INTO resumes (id, user_id, skills) VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET skills = EXCLUDED.skills, updated_at = now()
            RETURNING skills
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&skills)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn append_project(
        &self,
        user_id: Uuid,
        entry: ProjectEntry,
    ) -> Result<Vec<ProjectEntry>, AppError> {
        let stored: Json<Vec<ProjectEntry>> = sqlx::query_scalar(
            r#"
            INSERT INTO resumes (id, user_id, projects) VALUES ($1, $2, jsonb_build_array($3::jsonb))
            ON CONFLICT (user_id) DO UPDATE
                SET projects = resumes.projects || jsonb_build_array($3::jsonb),
                    updated_at = now()
            RETURNING projects
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(&entry))
        .fetch_one(&self.pool)
        .await?;
        Ok(stored.0)
    }

    async fn remove_project(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE resumes
            SET projects = COALESCE(
                    (SELECT jsonb_agg(p ORDER BY ord)
                     FROM jsonb_array_elements(projects) WITH ORDINALITY AS t(p, ord)
                     WHERE p->>'id' <> $2),
                    '[]'::jsonb),
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(entry_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_template(&self, user_id: Uuid, template: String) -> Result<String, AppError> {
        let stored: Option<String> = sqlx::query_scalar(
            r#"
            INSERT INTO resumes (id, user_id, template) VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET template = EXCLUDED.template, updated_at = now()
            RETURNING template
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&template)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored.unwrap_or(template))
    }

    async fn list_all(&self) -> Result<Vec<ResumeDocument>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ResumeDocument::from).collect())
    }
}
