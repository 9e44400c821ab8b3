//! Relocation Service
//!
//! Relocation listings with visa support, and application intake.

use crate::db::sqlite::models::{RelocationApplication, RELOCATION_APPLICATIONS};
use crate::db::DocumentStore;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;
use uuid::Uuid;

/// Relocation listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocateOpportunity {
    pub id: String,
    pub country: String,
    pub city: String,
    pub job_title: String,
    pub company: String,
    pub visa_type: String,
    pub salary_range: String,
    pub benefits: Vec<String>,
    pub requirements: Vec<String>,
    pub relocation_package: Map<String, Value>,
    pub application_url: String,
}

/// Country summary for the relocation picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationCountry {
    pub name: String,
    pub visa_type: String,
    pub processing_time: String,
}

/// Result of submitting an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResult {
    pub message: String,
    pub application_id: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn package(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Relocation service for business logic
pub struct RelocationService;

impl RelocationService {
    /// Current relocation opportunities
    pub fn opportunities() -> Vec<RelocateOpportunity> {
        vec![
            RelocateOpportunity {
                id: Uuid::new_v4().to_string(),
                country: "Portugal".to_string(),
                city: "Lisbon".to_string(),
                job_title: "Software Engineer".to_string(),
                company: "European Tech Hub".to_string(),
                visa_type: "Tech Visa".to_string(),
                salary_range: "€45k - €70k".to_string(),
                benefits: strings(&["Health Insurance", "Relocation Package", "Language Courses"]),
                requirements: strings(&["3+ years experience", "EU citizenship or visa"]),
                relocation_package: package(json!({
                    "housing_allowance": "€2000",
                    "flight_tickets": "Included",
                    "visa_assistance": "Full support"
                })),
                application_url: "https://example.com/portugal-job".to_string(),
            },
            RelocateOpportunity {
                id: Uuid::new_v4().to_string(),
                country: "Estonia".to_string(),
                city: "Tallinn".to_string(),
                job_title: "Digital Nomad Consultant".to_string(),
                company: "Baltic Innovations".to_string(),
                visa_type: "Digital Nomad Visa".to_string(),
                salary_range: "€40k - €60k".to_string(),
                benefits: strings(&["Tax Benefits", "Startup Environment", "EU Access"]),
                requirements: strings(&["Digital skills", "Remote work experience"]),
                relocation_package: package(json!({
                    "housing_allowance": "€1500",
                    "startup_visa": "Fast-track processing",
                    "networking_events": "Included"
                })),
                application_url: "https://example.com/estonia-job".to_string(),
            },
        ]
    }

    pub fn countries() -> Vec<RelocationCountry> {
        [
            ("Portugal", "Tech Visa", "2-3 months"),
            ("Estonia", "Digital Nomad Visa", "1-2 months"),
            ("Germany", "EU Blue Card", "3-4 months"),
            ("Canada", "Express Entry", "6-8 months"),
            ("Netherlands", "Highly Skilled Migrant", "2-3 months"),
        ]
        .into_iter()
        .map(|(name, visa_type, processing_time)| RelocationCountry {
            name: name.to_string(),
            visa_type: visa_type.to_string(),
            processing_time: processing_time.to_string(),
        })
        .collect()
    }

    /// Persist an application for `opportunity_id`
    pub async fn apply(
        store: &DocumentStore,
        opportunity_id: &str,
        applicant_data: Map<String, Value>,
    ) -> Result<ApplicationResult> {
        info!("RelocationService::apply - opportunity {}", opportunity_id);

        let application = RelocationApplication::new(opportunity_id, applicant_data);
        store.insert(RELOCATION_APPLICATIONS, &application).await?;

        Ok(ApplicationResult {
            message: "Application submitted successfully".to_string(),
            application_id: application.id,
        })
    }
}
