//! REST API request and response types
//!
//! Browsers and form posts send booleans in many spellings, so boolean query
//! parameters go through a lenient deserializer.

use crate::services::jobs_service::JobSearch;
use crate::services::weather_service::DEFAULT_CITY;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Custom Deserializers
// ============================================================================

/// Accept true/false, 1/0, yes/no and on/off, case-insensitively
fn deserialize_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleBool {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match FlexibleBool::deserialize(deserializer)? {
        FlexibleBool::Bool(b) => Ok(b),
        FlexibleBool::Int(0) => Ok(false),
        FlexibleBool::Int(1) => Ok(true),
        FlexibleBool::Int(i) => Err(serde::de::Error::custom(format!(
            "invalid boolean value: {}",
            i
        ))),
        FlexibleBool::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {}",
                other
            ))),
        },
    }
}

fn default_true() -> bool {
    true
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

// ============================================================================
// Request Types
// ============================================================================

/// GET /api/weather/enhanced
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherQuery {
    #[serde(default = "default_city")]
    pub city: String,
}

/// GET /api/jobs/search
#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchQuery {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_true", deserialize_with = "deserialize_flexible_bool")]
    pub remote_only: bool,
}

impl From<JobSearchQuery> for JobSearch {
    fn from(query: JobSearchQuery) -> Self {
        JobSearch {
            keyword: query.keyword,
            location: query.location,
            remote_only: query.remote_only,
        }
    }
}

/// POST /api/relocateme/apply
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    pub opportunity_id: String,
    pub applicant_data: Map<String, Value>,
}

/// POST /api/downloads/start
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadCreate {
    pub filename: String,
    pub url: String,
}

/// POST /api/status
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

impl CategoriesResponse {
    pub fn from_static(categories: &[&str]) -> Self {
        Self {
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CountriesResponse<T: Serialize> {
    pub countries: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "deserialize_flexible_bool")]
        value: bool,
    }

    fn parse(raw: &str) -> Option<bool> {
        serde_json::from_str::<Flag>(raw).ok().map(|f| f.value)
    }

    #[test]
    fn test_flexible_bool_spellings() {
        assert_eq!(parse(r#"{"value": true}"#), Some(true));
        assert_eq!(parse(r#"{"value": 0}"#), Some(false));
        assert_eq!(parse(r#"{"value": "Yes"}"#), Some(true));
        assert_eq!(parse(r#"{"value": "off"}"#), Some(false));
        assert_eq!(parse(r#"{"value": "maybe"}"#), None);
        assert_eq!(parse(r#"{"value": 7}"#), None);
    }

    #[test]
    fn test_job_search_defaults() {
        let query: JobSearchQuery = serde_json::from_str("{}").unwrap();
        let search = JobSearch::from(query);
        assert!(search.remote_only);
        assert!(search.keyword.is_empty());
        assert!(search.location.is_empty());
    }

    #[test]
    fn test_weather_query_default_city() {
        let query: WeatherQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.city, "London");
    }
}
