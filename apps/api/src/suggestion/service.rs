//! Suggestion service — rewrites a resume section via the completion provider.
//!
//! Flow: validate text → (no provider) heuristic/mock result
//!                     → (provider) build prompt → complete → normalize.
//!
//! A missing provider is a silent offline mode. A configured provider that
//! fails is reported as a provider error and never replaced by the heuristic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionProvider, CompletionRequest};
use crate::suggestion::extract::extract_json;
use crate::suggestion::heuristic::{improve_project, improve_summary, truncate_chars};
use crate::suggestion::prompts::{
    GENERAL_ADVICE, GENERAL_PROMPT_TEMPLATE, GENERAL_SYSTEM, PROJECT_PROMPT_TEMPLATE,
    PROJECT_SYSTEM, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM,
};

pub const MAX_TOKENS: u32 = 400;
pub const TEMPERATURE: f32 = 0.6;

const SPLIT_TITLE_MAX_CHARS: usize = 80;
const SPLIT_SUMMARY_FALLBACK_CHARS: usize = 300;
const SPLIT_DEFAULT_TITLE: &str = "Improved Project Title";
const MAX_ADVICE_SKILLS: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Request / result types
// ────────────────────────────────────────────────────────────────────────────

/// Which resume field the caller wants rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Project,
    Summary,
    General(String),
}

impl Section {
    /// Tags match exactly; `" project "` is a general section.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("project") => Section::Project,
            Some("summary") => Section::Summary,
            other => Section::General(other.unwrap_or_default().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Section::Project => "project",
            Section::Summary => "summary",
            Section::General(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionRequest {
    pub section: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestions {
    Text { value: String },
    Structured { title: String, summary: String },
    List { items: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionSource {
    Mock,
    External,
    ExternalHeuristic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionResult {
    pub suggestions: Suggestions,
    pub source: SuggestionSource,
}

impl SuggestionResult {
    fn new(suggestions: Suggestions, source: SuggestionSource) -> Self {
        Self {
            suggestions,
            source,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SuggestionService {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl SuggestionService {
    /// `None` selects the offline heuristic mode.
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_external(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn suggest(&self, request: SuggestionRequest) -> Result<SuggestionResult, AppError> {
        let text = request
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Missing text in request body".to_string()))?;
        let section = Section::from_tag(request.section.as_deref());

        let Some(provider) = &self.provider else {
            debug!("No completion provider configured, using mock for '{}'", section.as_str());
            return Ok(mock_suggestion(&section, text, &request.skills));
        };

        info!("Requesting external suggestion for section '{}'", section.as_str());
        let output = provider.complete(&build_prompt(&section, text)).await?;
        Ok(normalize_output(&section, output.trim()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Offline path
// ────────────────────────────────────────────────────────────────────────────

fn mock_suggestion(section: &Section, text: &str, skills: &[String]) -> SuggestionResult {
    let suggestions = match section {
        Section::Project => {
            let (title, summary) = improve_project(text);
            Suggestions::Structured { title, summary }
        }
        Section::Summary => Suggestions::Text {
            value: improve_summary(text),
        },
        Section::General(_) => {
            let keywords = skills
                .iter()
                .take(MAX_ADVICE_SKILLS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let mut items: Vec<String> = GENERAL_ADVICE.iter().map(|s| s.to_string()).collect();
            items.push(format!("Include keywords: {keywords}"));
            Suggestions::List { items }
        }
    };
    SuggestionResult::new(suggestions, SuggestionSource::Mock)
}

// ────────────────────────────────────────────────────────────────────────────
// External path
// ────────────────────────────────────────────────────────────────────────────

pub fn build_prompt(section: &Section, text: &str) -> CompletionRequest {
    let (system, template) = match section {
        Section::Project => (PROJECT_SYSTEM, PROJECT_PROMPT_TEMPLATE),
        Section::Summary => (SUMMARY_SYSTEM, SUMMARY_PROMPT_TEMPLATE),
        Section::General(_) => (GENERAL_SYSTEM, GENERAL_PROMPT_TEMPLATE),
    };
    CompletionRequest {
        messages: vec![
            ChatMessage::system(system),
            ChatMessage::user(template.replace("{text}", text)),
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// Turns trimmed provider output into a suggestion for `section`.
pub fn normalize_output(section: &Section, output: &str) -> SuggestionResult {
    match section {
        Section::Project => match extract_json(output).and_then(|v| structured_from_value(&v)) {
            Some(suggestions) => SuggestionResult::new(suggestions, SuggestionSource::External),
            None => {
                debug!("Provider output had no usable JSON, splitting heuristically");
                SuggestionResult::new(split_heuristically(output), SuggestionSource::ExternalHeuristic)
            }
        },
        Section::Summary => SuggestionResult::new(
            Suggestions::Text {
                value: output.lines().collect::<Vec<_>>().join(" ").trim().to_string(),
            },
            SuggestionSource::External,
        ),
        Section::General(_) => SuggestionResult::new(
            Suggestions::Text {
                value: output.to_string(),
            },
            SuggestionSource::External,
        ),
    }
}

/// Accepts an object exposing a non-empty string `title` or `summary`.
fn structured_from_value(value: &serde_json::Value) -> Option<Suggestions> {
    let obj = value.as_object()?;
    let field = |key: &str| {
        obj.get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    let title = field("title");
    let summary = field("summary");
    if title.is_none() && summary.is_none() {
        return None;
    }
    Some(Suggestions::Structured {
        title: title.unwrap_or_default(),
        summary: summary.unwrap_or_default(),
    })
}

/// First line becomes the title, the remaining lines the summary.
fn split_heuristically(output: &str) -> Suggestions {
    let mut lines = output.lines();
    let title = truncate_chars(lines.next().unwrap_or_default().trim(), SPLIT_TITLE_MAX_CHARS);
    let title = if title.is_empty() {
        SPLIT_DEFAULT_TITLE.to_string()
    } else {
        title
    };

    let rest = lines.collect::<Vec<_>>().join(" ");
    let rest = rest.trim();
    let summary = if rest.is_empty() {
        truncate_chars(output, SPLIT_SUMMARY_FALLBACK_CHARS)
    } else {
        rest.to_string()
    };

    Suggestions::Structured { title, summary }
}
