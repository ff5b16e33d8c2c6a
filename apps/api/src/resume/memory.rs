//! In-memory resume store, used when no database is configured.
//!
//! Each operation runs under one write lock, giving the same per-document
//! atomicity as the single-statement PostgreSQL updates.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{EducationEntry, PersonalInfo, ProjectEntry, ResumeDocument};
use crate::resume::store::ResumeStore;

#[derive(Default)]
pub struct MemoryResumeStore {
    documents: RwLock<HashMap<Uuid, ResumeDocument>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `update` to the user's document, creating it first if needed.
    async fn upsert<T>(&self, user_id: Uuid, update: impl FnOnce(&mut ResumeDocument) -> T) -> T {
        let mut documents = self.documents.write().await;
        let doc = documents
            .entry(user_id)
            .or_insert_with(|| ResumeDocument::empty(user_id));
        let out = update(doc);
        doc.updated_at = Utc::now();
        out
    }

    /// Applies `update` only if the user already has a document.
    async fn update_existing(&self, user_id: Uuid, update: impl FnOnce(&mut ResumeDocument)) {
        let mut documents = self.documents.write().await;
        if let Some(doc) = documents.get_mut(&user_id) {
            update(doc);
            doc.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn get_or_create(&self, user_id: Uuid) -> Result<ResumeDocument, AppError> {
        let mut documents = self.documents.write().await;
        Ok(documents
            .entry(user_id)
            .or_insert_with(|| ResumeDocument::empty(user_id))
            .clone())
    }

    async fn replace_personal(
        &self,
        user_id: Uuid,
        personal: PersonalInfo,
    ) -> Result<PersonalInfo, AppError> {
        Ok(self
            .upsert(user_id, |doc| {
                doc.personal = personal;
                doc.personal.clone()
            })
            .await)
    }

    async fn append_education(
        &self,
        user_id: Uuid,
        entry: EducationEntry,
    ) -> Result<Vec<EducationEntry>, AppError> {
        Ok(self
            .upsert(user_id, |doc| {
                doc.education.push(entry);
                doc.education.clone()
            })
            .await)
    }

    async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError> {
        self.update_existing(user_id, |doc| doc.education.retain(|e| e.id != entry_id))
            .await;
        Ok(())
    }

    async fn replace_skills(
        &self,
        user_id: Uuid,
        skills: Vec<String>,
    ) -> Result<Vec<String>, AppError> {
        Ok(self
            .upsert(user_id, |doc| {
                doc.skills = skills;
                doc.skills.clone()
            })
            .await)
    }

    async fn append_project(
        &self,
        user_id: Uuid,
        entry: ProjectEntry,
    ) -> Result<Vec<ProjectEntry>, AppError> {
        Ok(self
            .upsert(user_id, |doc| {
                doc.projects.push(entry);
                doc.projects.clone()
            })
            .await)
    }

    async fn remove_project(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError> {
        self.update_existing(user_id, |doc| doc.projects.retain(|p| p.id != entry_id))
            .await;
        Ok(())
    }

    async fn set_template(&self, user_id: Uuid, template: String) -> Result<String, AppError> {
        Ok(self
            .upsert(user_id, |doc| {
                doc.template = Some(template.clone());
                template
            })
            .await)
    }

    async fn list_all(&self) -> Result<Vec<ResumeDocument>, AppError> {
        let documents = self.documents.read().await;
        let mut all: Vec<_> = documents.values().cloned().collect();
        all.sort_by_key(|d| d.created_at);
        Ok(all)
    }
}
