//! HTTP server for the REST API
//!
//! Routes are registered with their full `/api/...` paths. CORS mirrors the
//! caller's origin, methods and headers and allows credentials.

use crate::api::handlers;
use crate::error::Result;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router around shared state
pub fn router(state: Arc<AppState>) -> Router {
    // Any origin, with credentials: the origin must be echoed back, not `*`
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        // ================================================================
        // Root
        // ================================================================
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))

        // ================================================================
        // System telemetry
        // ================================================================
        .route("/api/system/performance", get(handlers::system_performance))
        .route("/api/system/info", get(handlers::system_info))

        // ================================================================
        // Mock data providers
        // ================================================================
        .route("/api/weather/enhanced", get(handlers::enhanced_weather))
        .route("/api/weather/cities", get(handlers::weather_cities))
        .route("/api/news/live", get(handlers::live_news))
        .route("/api/news/categories", get(handlers::news_categories))
        .route("/api/jobs/live", get(handlers::live_jobs))
        .route("/api/jobs/search", get(handlers::search_jobs))
        .route("/api/relocateme/opportunities", get(handlers::relocate_opportunities))
        .route("/api/relocateme/countries", get(handlers::relocate_countries))
        .route("/api/relocateme/apply", post(handlers::apply_for_relocation))
        .route("/api/ai/tools", get(handlers::ai_tools))
        .route("/api/ai/categories", get(handlers::ai_categories))

        // ================================================================
        // Downloads
        // ================================================================
        .route("/api/downloads/start", post(handlers::start_download))
        .route("/api/downloads", get(handlers::list_downloads))
        .route(
            "/api/downloads/:download_id",
            get(handlers::get_download).delete(handlers::delete_download),
        )

        // ================================================================
        // Status checks
        // ================================================================
        .route(
            "/api/status",
            post(handlers::create_status_check).get(handlers::list_status_checks),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// API server
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Bind and serve until `shutdown` resolves, then stop background work
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.state.config.bind_addr()?;
        let app = router(Arc::clone(&self.state));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Starting API server on {}", addr);
        log_endpoints(&addr);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("API server shutting down");
            })
            .await;

        self.state.shutdown();
        result?;

        info!("API server stopped");
        Ok(())
    }
}

fn log_endpoints(addr: &SocketAddr) {
    info!("=== Endpoints ===");
    info!("  GET    http://{}/api/", addr);
    info!("System:");
    info!("  GET    http://{}/api/system/performance", addr);
    info!("  GET    http://{}/api/system/info", addr);
    info!("Dashboard data:");
    info!("  GET    http://{}/api/weather/enhanced?city=", addr);
    info!("  GET    http://{}/api/weather/cities", addr);
    info!("  GET    http://{}/api/news/live", addr);
    info!("  GET    http://{}/api/news/categories", addr);
    info!("  GET    http://{}/api/jobs/live", addr);
    info!("  GET    http://{}/api/jobs/search?keyword=&location=&remote_only=", addr);
    info!("  GET    http://{}/api/relocateme/opportunities", addr);
    info!("  GET    http://{}/api/relocateme/countries", addr);
    info!("  POST   http://{}/api/relocateme/apply", addr);
    info!("  GET    http://{}/api/ai/tools", addr);
    info!("  GET    http://{}/api/ai/categories", addr);
    info!("Downloads:");
    info!("  POST   http://{}/api/downloads/start", addr);
    info!("  GET    http://{}/api/downloads", addr);
    info!("  GET    http://{}/api/downloads/{{id}}", addr);
    info!("  DELETE http://{}/api/downloads/{{id}}", addr);
    info!("Status:");
    info!("  POST   http://{}/api/status", addr);
    info!("  GET    http://{}/api/status", addr);
}
