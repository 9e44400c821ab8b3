//! REST API module
//!
//! JSON endpoints under `/api` for the remote work dashboard:
//! - System telemetry (`/api/system/*`)
//! - Mock weather, news, jobs, relocation and AI tool data
//! - Simulated downloads (`/api/downloads*`)
//! - Status checks (`/api/status`)

pub mod handlers;
mod server;
pub mod types;

pub use server::{router, ApiServer};
