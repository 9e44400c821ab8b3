//! REST API endpoint handlers
//!
//! Thin adapters: extract and validate input, call the service layer, shape
//! the JSON response. Errors surface as `AppError` and render as
//! `{"detail": ...}`.

use crate::api::types::*;
use crate::db::sqlite::models::{DownloadItem, StatusCheck};
use crate::error::{AppError, Result};
use crate::services::{
    AiToolsResult, AiToolsService, ApplicationResult, JobOpportunity, JobsService, NewsItem,
    NewsService, RelocateOpportunity, RelocationCountry, RelocationService, StatusService,
    SystemInfo, SystemPerformance, SystemService, WeatherData, WeatherService,
};
use crate::state::AppState;
use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Json, Path, Query, State,
};
use std::sync::Arc;
use tracing::info;

type ApiState = State<Arc<AppState>>;

// ============================================================================
// Root
// ============================================================================

/// Liveness/info message - GET /api/
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "ThriveRemoteOS API v5.4 - Professional Remote Work Platform",
    ))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

// ============================================================================
// System
// ============================================================================

/// Telemetry snapshot - GET /api/system/performance
pub async fn system_performance() -> Result<Json<SystemPerformance>> {
    Ok(Json(SystemService::performance().await?))
}

/// Host info - GET /api/system/info
pub async fn system_info() -> Result<Json<SystemInfo>> {
    Ok(Json(SystemService::info().await?))
}

// ============================================================================
// Weather
// ============================================================================

/// Weather with forecast - GET /api/weather/enhanced?city=
pub async fn enhanced_weather(
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherData>> {
    let Query(query) = query?;
    Ok(Json(WeatherService::enhanced(&query.city)))
}

/// GET /api/weather/cities
pub async fn weather_cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: WeatherService::cities().iter().map(|c| c.to_string()).collect(),
    })
}

// ============================================================================
// News
// ============================================================================

/// GET /api/news/live
pub async fn live_news() -> Json<Vec<NewsItem>> {
    Json(NewsService::live())
}

/// GET /api/news/categories
pub async fn news_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse::from_static(NewsService::categories()))
}

// ============================================================================
// Jobs
// ============================================================================

/// GET /api/jobs/live
pub async fn live_jobs() -> Json<Vec<JobOpportunity>> {
    Json(JobsService::live())
}

/// Filtered jobs - GET /api/jobs/search?keyword=&location=&remote_only=
pub async fn search_jobs(
    query: std::result::Result<Query<JobSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<JobOpportunity>>> {
    let Query(query) = query?;
    Ok(Json(JobsService::search(&query.into())))
}

// ============================================================================
// RelocateMe
// ============================================================================

/// GET /api/relocateme/opportunities
pub async fn relocate_opportunities() -> Json<Vec<RelocateOpportunity>> {
    Json(RelocationService::opportunities())
}

/// GET /api/relocateme/countries
pub async fn relocate_countries() -> Json<CountriesResponse<RelocationCountry>> {
    Json(CountriesResponse {
        countries: RelocationService::countries(),
    })
}

/// Submit an application - POST /api/relocateme/apply
pub async fn apply_for_relocation(
    State(state): ApiState,
    payload: std::result::Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Json<ApplicationResult>> {
    let Json(request) = payload?;
    let result =
        RelocationService::apply(&state.store, &request.opportunity_id, request.applicant_data)
            .await?;
    Ok(Json(result))
}

// ============================================================================
// Downloads
// ============================================================================

/// Start a simulated download - POST /api/downloads/start
pub async fn start_download(
    State(state): ApiState,
    payload: std::result::Result<Json<DownloadCreate>, JsonRejection>,
) -> Result<Json<DownloadItem>> {
    let Json(request) = payload?;
    let item = state.downloads.start(&request.filename, &request.url).await?;
    Ok(Json(item))
}

/// GET /api/downloads
pub async fn list_downloads(State(state): ApiState) -> Result<Json<Vec<DownloadItem>>> {
    Ok(Json(state.downloads.list().await?))
}

/// GET /api/downloads/{download_id}
pub async fn get_download(
    State(state): ApiState,
    Path(download_id): Path<String>,
) -> Result<Json<DownloadItem>> {
    Ok(Json(state.downloads.get(&download_id).await?))
}

/// DELETE /api/downloads/{download_id}
pub async fn delete_download(
    State(state): ApiState,
    Path(download_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    info!("Delete requested for download {}", download_id);
    state.downloads.delete(&download_id).await?;
    Ok(Json(MessageResponse::new("Download deleted successfully")))
}

// ============================================================================
// AI Tools
// ============================================================================

/// GET /api/ai/tools
pub async fn ai_tools() -> Json<AiToolsResult> {
    Json(AiToolsService::tools())
}

/// GET /api/ai/categories
pub async fn ai_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse::from_static(AiToolsService::categories()))
}

// ============================================================================
// Status checks
// ============================================================================

/// POST /api/status
pub async fn create_status_check(
    State(state): ApiState,
    payload: std::result::Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>> {
    let Json(request) = payload?;
    Ok(Json(StatusService::create(&state.store, &request.client_name).await?))
}

/// GET /api/status
pub async fn list_status_checks(State(state): ApiState) -> Result<Json<Vec<StatusCheck>>> {
    Ok(Json(StatusService::list(&state.store).await?))
}
