use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::JobApiConfig;
use crate::jobs::mock::extract_skills;
use crate::jobs::{Job, JobPage, SearchQuery};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Error)]
pub enum JobsError {
    #[error("external job API not configured")]
    NotConfigured,

    #[error("job API request failed: {0}")]
    Http(reqwest::Error),
}

/// The request URL carries `app_key` in its query string, so it is dropped.
impl From<reqwest::Error> for JobsError {
    fn from(err: reqwest::Error) -> Self {
        JobsError::Http(err.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawJob>,
    #[serde(default)]
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    #[serde(default)]
    id: Value,
    title: Option<String>,
    description: Option<String>,
    description_plain: Option<String>,
    #[serde(default)]
    company: Value,
    #[serde(default)]
    location: Value,
    redirect_url: Option<String>,
    #[serde(rename = "redirectUrl")]
    redirect_url_camel: Option<String>,
}

/// Adzuna-style job search client.
#[derive(Clone)]
pub struct JobSearchClient {
    http: reqwest::Client,
    config: JobApiConfig,
}

impl JobSearchClient {
    pub fn new(config: JobApiConfig) -> Result<Self, JobsError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// GET {base}/{country}/search/{page}
    pub async fn search(&self, query: &SearchQuery) -> Result<JobPage, JobsError> {
        let url = format!(
            "{}/{}/search/{}",
            self.config.base_url, self.config.country, query.page
        );
        let per_page = query.results_per_page.to_string();

        let data: SearchResponse = self
            .http
            .get(&url)
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
                ("results_per_page", per_page.as_str()),
                ("what", query.what.as_str()),
                ("where", query.location.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let jobs: Vec<Job> = data.results.into_iter().map(map_job).collect();
        debug!("Job API page {} returned {} results", query.page, jobs.len());
        let count = data
            .count
            .filter(|c| *c > 0)
            .unwrap_or(jobs.len() as u64);
        Ok(JobPage { jobs, count })
    }
}

fn map_job(raw: RawJob) -> Job {
    let description = raw
        .description
        .filter(|d| !d.is_empty())
        .or(raw.description_plain)
        .unwrap_or_default();
    let skills = extract_skills(&format!(
        "{} {description}",
        raw.title.as_deref().unwrap_or_default()
    ));
    Job {
        id: value_to_id(&raw.id),
        title: raw.title,
        company: display_name(&raw.company),
        location: display_name(&raw.location).unwrap_or_default(),
        url: raw.redirect_url.or(raw.redirect_url_camel),
        description,
        skills,
    }
}

/// Accepts `{ "display_name": ... }` objects or bare strings.
fn display_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map
            .get("display_name")
            .and_then(Value::as_str)
            .map(String::from),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn value_to_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> JobSearchClient {
        JobSearchClient::new(JobApiConfig {
            base_url: server.base_url(),
            app_id: "id-123".to_string(),
            app_key: "key-456".to_string(),
            country: "in".to_string(),
        })
        .unwrap()
    }

    fn query(page: usize, what: &str) -> SearchQuery {
        SearchQuery {
            page,
            what: what.to_string(),
            location: "India".to_string(),
            results_per_page: 10,
        }
    }

    #[tokio::test]
    async fn test_search_sends_credentials_and_maps_results() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/in/search/2")
                    .query_param("app_id", "id-123")
                    .query_param("app_key", "key-456")
                    .query_param("results_per_page", "10")
                    .query_param("what", "rust")
                    .query_param("where", "India");
                then.status(200).json_body(json!({
                    "count": 42,
                    "results": [{
                        "id": 9001,
                        "title": "Rust Developer",
                        "description": "Backend work with Docker and Postgres.",
                        "company": {"display_name": "Ferrous Ltd"},
                        "location": {"display_name": "Pune"},
                        "redirect_url": "https://jobs.example/9001"
                    }]
                }));
            })
            .await;

        let page = client_for(&server).search(&query(2, "rust")).await.unwrap();
        mock.assert_async().await;

        assert_eq!(page.count, 42);
        let job = &page.jobs[0];
        assert_eq!(job.id, "9001");
        assert_eq!(job.company.as_deref(), Some("Ferrous Ltd"));
        assert_eq!(job.location, "Pune");
        assert_eq!(job.url.as_deref(), Some("https://jobs.example/9001"));
        assert!(job.skills.contains(&"docker".to_string()));
        assert!(job.skills.contains(&"postgres".to_string()));
    }

    #[tokio::test]
    async fn test_missing_count_falls_back_to_result_length() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/in/search/1");
                then.status(200).json_body(json!({
                    "results": [
                        {"id": "a", "title": "One", "company": "Plain Co", "location": "Goa"},
                        {"id": "b", "title": "Two"}
                    ]
                }));
            })
            .await;

        let page = client_for(&server).search(&query(1, "")).await.unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.jobs[0].company.as_deref(), Some("Plain Co"));
        assert_eq!(page.jobs[0].location, "Goa");
        assert_eq!(page.jobs[1].location, "");
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/in/search/1");
                then.status(500).body("boom");
            })
            .await;

        let err = client_for(&server).search(&query(1, "")).await.unwrap_err();
        assert!(matches!(err, JobsError::Http(_)));
    }

    #[tokio::test]
    async fn test_error_display_omits_credentials() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/in/search/1");
                then.status(503);
            })
            .await;

        let err = client_for(&server).search(&query(1, "")).await.unwrap_err();
        let logged = format!("Job API error or not configured: {err}");
        assert!(logged.contains("503"), "{logged}");
        assert!(!logged.contains("key-456"), "{logged}");
        assert!(!logged.contains("app_key"), "{logged}");
    }
}
