//! Plan generation handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use motion_synth::{GenerateRequest, Generated};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Generate a production plan from a brief.
///
/// Responds 422 when the brief is invalid. Any later failure still yields a
/// plan, with an advisory `error` next to it.
pub async fn generate_plan(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<Generated>> {
    let Json(request) = payload.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        _ => ApiError::bad_request(e.body_text()),
    })?;

    if request.has_credential() && state.config.is_production() {
        warn!("Received a client-supplied credential in production; it is used for this request only");
    }

    let generated = state.orchestrator.generate(request).await?;

    info!(
        used_remote = generated.used_remote,
        scenes = generated.plan.scenes.len(),
        advisory = generated.error.is_some(),
        "Plan generated"
    );

    Ok(Json(generated))
}
