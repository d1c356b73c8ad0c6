//! Health check handlers.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use motion_models::{plan_json_schema, Brief};
use motion_synth::deterministic;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub synthesis: CheckStatus,
    pub plan_schema: CheckStatus,
    pub default_model: String,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl CheckStatus {
    fn ok(latency_ms: u64) -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
            latency_ms: Some(latency_ms),
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(msg.into()),
            latency_ms: None,
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Readiness check endpoint (readiness probe).
/// Runs the deterministic path on the sample brief. The remote service is
/// optional and never probed.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let synthesis = {
        let start = Instant::now();
        match deterministic(&Brief::sample()).error {
            None => CheckStatus::ok(start.elapsed().as_millis() as u64),
            Some(e) => CheckStatus::error(e),
        }
    };

    let plan_schema = {
        let start = Instant::now();
        match plan_json_schema() {
            Ok(schema) if schema.get("properties").is_some() => {
                CheckStatus::ok(start.elapsed().as_millis() as u64)
            }
            Ok(_) => CheckStatus::error("Plan schema has no properties"),
            Err(e) => CheckStatus::error(format!("Plan schema failed to serialize: {}", e)),
        }
    };

    let all_ok = synthesis.is_ok() && plan_schema.is_ok();

    let response = ReadinessResponse {
        status: if all_ok { "ready" } else { "degraded" }.to_string(),
        checks: ReadinessChecks {
            synthesis,
            plan_schema,
            default_model: state.orchestrator.config().default_model.clone(),
        },
    };

    if all_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
