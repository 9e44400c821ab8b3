//! Services Layer
//!
//! Business logic called by the REST handlers. Every provider except
//! telemetry, status checks and relocation applications returns fixed or
//! templated content; nothing here calls an external API.
//!
//! # Services
//!
//! - `WeatherService` - Current conditions and forecast per city
//! - `NewsService` - Technology and employment headlines
//! - `JobsService` - Remote job listings and search
//! - `RelocationService` - Relocation listings and applications
//! - `AiToolsService` - AI tool catalogue
//! - `StatusService` - Client status checks
//! - `SystemService` - Host telemetry

pub mod ai_tools_service;
pub mod jobs_service;
pub mod news_service;
pub mod relocation_service;
pub mod status_service;
pub mod system_service;
pub mod weather_service;

// Re-export commonly used types and services
pub use ai_tools_service::{AiTool, AiToolsResult, AiToolsService};
pub use jobs_service::{JobOpportunity, JobSearch, JobsService};
pub use news_service::{NewsItem, NewsService};
pub use relocation_service::{
    ApplicationResult, RelocateOpportunity, RelocationCountry, RelocationService,
};
pub use status_service::StatusService;
pub use system_service::{SystemInfo, SystemPerformance, SystemService};
pub use weather_service::{ForecastDay, WeatherData, WeatherService};
