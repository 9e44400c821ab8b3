//! Jobs Service
//!
//! Remote job listings and in-memory search over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Job listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOpportunity {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: Option<String>,
    pub remote_type: String,
    pub url: String,
    pub visa_support: bool,
    pub posted_date: DateTime<Utc>,
}

/// Search criteria, combined with logical AND
#[derive(Debug, Clone)]
pub struct JobSearch {
    /// Matched against title and description; empty matches everything
    pub keyword: String,
    /// Matched against location; empty matches everything
    pub location: String,
    /// Keep only listings whose remote type mentions "remote"
    pub remote_only: bool,
}

impl Default for JobSearch {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            location: String::new(),
            remote_only: true,
        }
    }
}

impl JobSearch {
    pub fn matches(&self, job: &JobOpportunity) -> bool {
        let keyword = self.keyword.to_lowercase();
        if !keyword.is_empty()
            && !job.title.to_lowercase().contains(&keyword)
            && !job.description.to_lowercase().contains(&keyword)
        {
            return false;
        }

        let location = self.location.to_lowercase();
        if !location.is_empty() && !job.location.to_lowercase().contains(&location) {
            return false;
        }

        !self.remote_only || job.remote_type.to_lowercase().contains("remote")
    }
}

struct Listing {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    description: &'static str,
    salary: &'static str,
    remote_type: &'static str,
    url: &'static str,
    visa_support: bool,
}

const LISTINGS: [Listing; 3] = [
    Listing {
        title: "Senior Full Stack Developer",
        company: "TechCorp International",
        location: "Remote (Global)",
        description: "Join our remote team building cutting-edge applications...",
        salary: "$80k - $120k",
        remote_type: "Fully Remote",
        url: "https://example.com/job1",
        visa_support: true,
    },
    Listing {
        title: "UX/UI Designer",
        company: "Design Studio",
        location: "Remote (EU)",
        description: "Create beautiful and intuitive user experiences...",
        salary: "€60k - €85k",
        remote_type: "Hybrid",
        url: "https://example.com/job2",
        visa_support: false,
    },
    Listing {
        title: "Data Scientist",
        company: "AI Innovations",
        location: "Remote (US/CA)",
        description: "Work with cutting-edge AI and machine learning...",
        salary: "$90k - $140k",
        remote_type: "Fully Remote",
        url: "https://example.com/job3",
        visa_support: true,
    },
];

/// Jobs service for business logic
pub struct JobsService;

impl JobsService {
    /// Current remote job listings
    pub fn live() -> Vec<JobOpportunity> {
        let posted_date = Utc::now();
        LISTINGS
            .iter()
            .map(|l| JobOpportunity {
                id: Uuid::new_v4().to_string(),
                title: l.title.to_string(),
                company: l.company.to_string(),
                location: l.location.to_string(),
                description: l.description.to_string(),
                salary: Some(l.salary.to_string()),
                remote_type: l.remote_type.to_string(),
                url: l.url.to_string(),
                visa_support: l.visa_support,
                posted_date,
            })
            .collect()
    }

    /// Listings matching every criterion in `search`
    pub fn search(search: &JobSearch) -> Vec<JobOpportunity> {
        info!(
            "JobsService::search - keyword={:?} location={:?} remote_only={}",
            search.keyword, search.location, search.remote_only
        );

        Self::live()
            .into_iter()
            .filter(|job| search.matches(job))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(jobs: &[JobOpportunity]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_default_search_keeps_remote_only() {
        let jobs = JobsService::search(&JobSearch::default());
        assert_eq!(titles(&jobs), ["Senior Full Stack Developer", "Data Scientist"]);
        assert!(jobs.iter().all(|j| j.remote_type.to_lowercase().contains("remote")));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let search = JobSearch {
            keyword: "DESIGNER".to_string(),
            remote_only: false,
            ..JobSearch::default()
        };
        assert_eq!(titles(&JobsService::search(&search)), ["UX/UI Designer"]);
    }

    #[test]
    fn test_keyword_and_remote_only_combine() {
        // The only designer role is hybrid
        let search = JobSearch {
            keyword: "Designer".to_string(),
            ..JobSearch::default()
        };
        assert!(JobsService::search(&search).is_empty());
    }

    #[test]
    fn test_keyword_matches_description() {
        let search = JobSearch {
            keyword: "machine learning".to_string(),
            ..JobSearch::default()
        };
        assert_eq!(titles(&JobsService::search(&search)), ["Data Scientist"]);
    }

    #[test]
    fn test_location_filter() {
        let search = JobSearch {
            location: "us/ca".to_string(),
            remote_only: false,
            ..JobSearch::default()
        };
        assert_eq!(titles(&JobsService::search(&search)), ["Data Scientist"]);
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let search = JobSearch {
            remote_only: false,
            ..JobSearch::default()
        };
        assert_eq!(JobsService::search(&search).len(), JobsService::live().len());
    }
}
