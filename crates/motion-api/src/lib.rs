//! Axum HTTP API server for MotionDirector.
//!
//! This crate provides:
//! - `POST /api/generate` turning a brief into a production plan
//! - Health, readiness and Prometheus metrics endpoints
//! - Per-IP rate limiting and security headers

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
