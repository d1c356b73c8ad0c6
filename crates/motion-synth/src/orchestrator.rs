//! Request orchestration.
//!
//! Validates the brief, tries the remote path when a credential is present and
//! falls back to deterministic synthesis otherwise. Once a brief is valid the
//! caller always receives a plan.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use motion_models::{check_plan, Brief, BriefError, Plan};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::assembler::{assemble_plan, minimal_plan};
use crate::composer::compose_scenes;
use crate::config::SynthConfig;
use crate::error::{SynthError, SynthResult};
use crate::gateway::{self, Credential, Deadline, OpenAiGateway, RemoteFailure, RemoteSynthesis};
use crate::metrics;

/// Incoming generation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Raw brief payload; validated by the orchestrator
    #[serde(default)]
    pub input: Value,
    #[serde(default, alias = "apiKey")]
    pub credential: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl GenerateRequest {
    pub fn has_credential(&self) -> bool {
        self.credential
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

/// A plan plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated {
    /// Advisory failure reported next to a best-effort plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub plan: Plan,
    pub used_remote: bool,
}

impl Generated {
    fn remote(plan: Plan) -> Self {
        Self {
            error: None,
            plan,
            used_remote: true,
        }
    }

    fn deterministic(plan: Plan) -> Self {
        Self {
            error: None,
            plan,
            used_remote: false,
        }
    }

    fn advisory(plan: Plan, err: SynthError) -> Self {
        Self {
            error: Some(err.to_string()),
            plan,
            used_remote: false,
        }
    }
}

/// Sequences brief validation, remote synthesis and deterministic fallback.
#[derive(Clone)]
pub struct Orchestrator {
    gateway: Arc<dyn RemoteSynthesis>,
    config: SynthConfig,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn RemoteSynthesis>, config: SynthConfig) -> Self {
        Self { gateway, config }
    }

    /// Orchestrator talking to the configured OpenAI endpoint.
    pub fn from_config(config: SynthConfig) -> Self {
        let gateway = Arc::new(OpenAiGateway::from_config(&config));
        Self::new(gateway, config)
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Produce a plan for a request.
    ///
    /// Only an invalid brief is returned as an error.
    pub async fn generate(&self, request: GenerateRequest) -> SynthResult<Generated> {
        let brief = Brief::from_value(request.input).map_err(|e| {
            let kind = match e {
                BriefError::InvalidInput(_) => "invalid_input",
                BriefError::OutOfRange { .. } => "out_of_range",
            };
            metrics::record_brief_rejected(kind);
            warn!(kind, "Brief rejected: {}", e);
            SynthError::from(e)
        })?;

        let credential = request.credential.as_deref().and_then(Credential::new);
        if let Some(credential) = credential {
            let model = self.config.model_or_default(request.model.as_deref());
            match self.remote_plan(&brief, credential, model).await {
                Ok(plan) => {
                    metrics::record_plan_generated("remote");
                    return Ok(Generated::remote(plan));
                }
                Err(e) => info!("{}; falling back to deterministic synthesis", e),
            }
        }

        Ok(deterministic(&brief))
    }

    /// Run the gateway on its own task so a panic there is contained.
    async fn remote_plan(
        &self,
        brief: &Brief,
        credential: Credential,
        model: String,
    ) -> SynthResult<Plan> {
        let gateway = Arc::clone(&self.gateway);
        let brief = brief.clone();
        let deadline = Deadline::standard();

        let task = tokio::spawn(async move {
            gateway::synthesize(gateway.as_ref(), &brief, Some(&credential), &model, deadline).await
        });

        match task.await {
            Ok(outcome) => Ok(outcome.into_result()?),
            Err(e) => {
                warn!("Remote synthesis task aborted: {}", e);
                let failure = RemoteFailure::Aborted(e.to_string());
                metrics::record_remote_failure(failure.reason());
                Err(failure.into())
            }
        }
    }
}

/// Deterministic plan for a validated brief.
pub fn deterministic(brief: &Brief) -> Generated {
    deterministic_with(brief, |b| assemble_plan(b, compose_scenes(b)))
}

fn deterministic_with<F>(brief: &Brief, build: F) -> Generated
where
    F: FnOnce(&Brief) -> Plan,
{
    match panic::catch_unwind(AssertUnwindSafe(|| build(brief))) {
        Ok(plan) => match check_plan(&plan) {
            Ok(()) => {
                metrics::record_plan_generated("deterministic");
                Generated::deterministic(plan)
            }
            Err(e) => {
                error!("Deterministic plan failed its own contract: {}", e);
                metrics::record_internal_failure();
                Generated::advisory(plan, SynthError::internal(e.to_string()))
            }
        },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Deterministic synthesis panicked: {}", message);
            metrics::record_internal_failure();
            Generated::advisory(minimal_plan(brief), SynthError::internal(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
