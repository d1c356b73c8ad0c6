//! Sample brief handler.

use axum::Json;
use motion_models::{Brief, Plan};
use motion_synth::deterministic;
use serde::Serialize;

/// The editor's starting brief with its deterministic plan.
#[derive(Serialize)]
pub struct SampleResponse {
    pub brief: Brief,
    pub plan: Plan,
}

pub async fn sample_brief() -> Json<SampleResponse> {
    let brief = Brief::sample();
    let plan = deterministic(&brief).plan;
    Json(SampleResponse { brief, plan })
}
