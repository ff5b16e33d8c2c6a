//! Job listings: an external search provider with a static mock fallback.
//!
//! Provider failures never reach the caller. Any error (including missing
//! configuration) is logged and answered from the mock list instead.

pub mod client;
pub mod handlers;
pub mod mock;

use serde::Serialize;
use tracing::{debug, warn};

use crate::jobs::client::{JobSearchClient, JobsError};
use crate::jobs::mock::{filter_by_skills, mock_jobs, paginate};

pub const DEFAULT_LOCATION: &str = "India";
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

const DETAIL_SCAN_PAGES: usize = 3;
const DETAIL_SCAN_PER_PAGE: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: String,
    pub url: Option<String>,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub count: u64,
}

#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// 1-based.
    pub page: usize,
    pub what: String,
    pub location: String,
    pub results_per_page: usize,
}

#[derive(Clone)]
pub struct JobBoard {
    client: Option<JobSearchClient>,
}

impl JobBoard {
    /// `None` serves mock listings only.
    pub fn new(client: Option<JobSearchClient>) -> Self {
        Self { client }
    }

    async fn external(&self, query: &SearchQuery) -> Result<JobPage, JobsError> {
        match &self.client {
            Some(client) => client.search(query).await,
            None => Err(JobsError::NotConfigured),
        }
    }

    pub async fn search(&self, query: SearchQuery) -> JobPage {
        match self.external(&query).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Job API error or not configured: {e}");
                let all: Vec<&Job> = mock_jobs().iter().collect();
                paginate(&all, query.page, query.results_per_page)
            }
        }
    }

    /// Searches for any of `skills`; the fallback keeps mock jobs sharing one.
    pub async fn suggest(&self, skills: &[String], page: usize, results_per_page: usize) -> JobPage {
        let query = SearchQuery {
            page,
            what: skills.join(" OR "),
            location: DEFAULT_LOCATION.to_string(),
            results_per_page,
        };
        match self.external(&query).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Job suggestion external failure: {e}");
                let filtered = filter_by_skills(mock_jobs(), skills);
                paginate(&filtered, page, results_per_page)
            }
        }
    }

    /// Scans the first few external pages, then the mock list.
    pub async fn find(&self, id: &str) -> Option<Job> {
        for page in 1..=DETAIL_SCAN_PAGES {
            let query = SearchQuery {
                page,
                what: String::new(),
                location: DEFAULT_LOCATION.to_string(),
                results_per_page: DETAIL_SCAN_PER_PAGE,
            };
            match self.external(&query).await {
                Ok(found) => {
                    if let Some(job) = found.jobs.into_iter().find(|j| j.id == id) {
                        return Some(job);
                    }
                }
                Err(e) => {
                    debug!("Stopping job detail scan at page {page}: {e}");
                    break;
                }
            }
        }
        mock_jobs().iter().find(|j| j.id == id).cloned()
    }
}
