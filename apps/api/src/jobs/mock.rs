use std::sync::OnceLock;

use crate::jobs::{Job, JobPage};

/// Tech keywords recognised in job titles and descriptions. Matching is
/// substring-based, so "node.js" also yields "node".
const SKILL_KEYWORDS: &[&str] = &[
    "react", "javascript", "node", "node.js", "express", "mongodb", "mongo", "sql", "mysql",
    "postgres", "python", "django", "flask", "java", "spring", "aws", "docker", "kubernetes",
    "php", "html", "css", "typescript", "angular", "ruby", "golang", "go",
];

pub fn extract_skills(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SKILL_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

/// Static listings served when the external provider is unavailable.
pub fn mock_jobs() -> &'static [Job] {
    static JOBS: OnceLock<Vec<Job>> = OnceLock::new();
    JOBS.get_or_init(|| {
        vec![
            mock_job(
                "m1",
                "Frontend Developer",
                "TechCorp",
                "Remote",
                "https://example.com/jobs/frontend",
                "Build modern UIs with React and JavaScript.",
                &["react", "javascript", "css"],
            ),
            mock_job(
                "m2",
                "Backend Developer",
                "DataSoft",
                "Bangalore",
                "https://example.com/jobs/backend",
                "Work on Node.js APIs and MongoDB.",
                &["node.js", "mongodb", "express"],
            ),
            mock_job(
                "m3",
                "Fullstack Engineer",
                "InnovateX",
                "Delhi",
                "https://example.com/jobs/fullstack",
                "React + Node.js fullstack role.",
                &["react", "node.js", "mongodb"],
            ),
        ]
    })
}

fn mock_job(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    url: &str,
    description: &str,
    skills: &[&str],
) -> Job {
    Job {
        id: id.to_string(),
        title: Some(title.to_string()),
        company: Some(company.to_string()),
        location: location.to_string(),
        url: Some(url.to_string()),
        description: description.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// Jobs sharing at least one skill with `skills`, case-insensitively.
/// An empty skill list keeps everything.
pub fn filter_by_skills<'a>(jobs: &'a [Job], skills: &[String]) -> Vec<&'a Job> {
    if skills.is_empty() {
        return jobs.iter().collect();
    }
    let wanted: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    jobs.iter()
        .filter(|job| job.skills.iter().any(|s| wanted.contains(&s.to_lowercase())))
        .collect()
}

/// One 1-based page of `jobs`; `count` is the total before slicing.
pub fn paginate(jobs: &[&Job], page: usize, per_page: usize) -> JobPage {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    JobPage {
        jobs: jobs
            .iter()
            .skip(start)
            .take(per_page)
            .map(|job| (*job).clone())
            .collect(),
        count: jobs.len() as u64,
    }
}
