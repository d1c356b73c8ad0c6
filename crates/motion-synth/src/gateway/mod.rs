//! Remote plan synthesis.
//!
//! The remote model is untrusted and bounded in time. [`synthesize`] drives a
//! single attempt through `Idle -> Requesting -> Succeeded | Failed` and never
//! returns an error to its caller: every failure is folded into
//! [`RemoteOutcome::Failed`] so the orchestrator can fall back.

mod openai;

pub use openai::OpenAiGateway;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use motion_models::{Brief, Plan, SchemaError};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::metrics;

/// Hard upper bound on a single remote attempt.
pub const REMOTE_DEADLINE: Duration = Duration::from_secs(12);

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Caller-supplied API credential.
///
/// Only constructed from non-blank input. `Debug` never prints the value.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Point in time after which a remote attempt is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Self(Instant::now() + duration)
    }

    /// The standard deadline for a remote attempt starting now.
    pub fn standard() -> Self {
        Self::after(REMOTE_DEADLINE)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl GatewayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayState::Idle => "idle",
            GatewayState::Requesting => "requesting",
            GatewayState::Succeeded => "succeeded",
            GatewayState::Failed => "failed",
        }
    }
}

impl fmt::Display for GatewayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a remote attempt produced no usable plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("No credential supplied")]
    NoCredential,

    #[error("Remote request failed: {0}")]
    Transport(String),

    #[error("Remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed remote reply: {0}")]
    MalformedReply(String),

    #[error("Remote plan rejected: {0}")]
    Schema(#[from] SchemaError),

    #[error("Remote request exceeded its {}s deadline", REMOTE_DEADLINE.as_secs())]
    DeadlineElapsed,

    #[error("Remote task aborted: {0}")]
    Aborted(String),
}

impl RemoteFailure {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            RemoteFailure::NoCredential => "no_credential",
            RemoteFailure::Transport(_) => "transport",
            RemoteFailure::Status { .. } => "status",
            RemoteFailure::MalformedReply(_) => "malformed_reply",
            RemoteFailure::Schema(_) => "schema",
            RemoteFailure::DeadlineElapsed => "deadline",
            RemoteFailure::Aborted(_) => "aborted",
        }
    }
}

/// Terminal state of one remote attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Succeeded(Plan),
    Failed(RemoteFailure),
}

impl RemoteOutcome {
    pub fn state(&self) -> GatewayState {
        match self {
            RemoteOutcome::Succeeded(_) => GatewayState::Succeeded,
            RemoteOutcome::Failed(_) => GatewayState::Failed,
        }
    }

    pub fn into_result(self) -> Result<Plan, RemoteFailure> {
        match self {
            RemoteOutcome::Succeeded(plan) => Ok(plan),
            RemoteOutcome::Failed(failure) => Err(failure),
        }
    }
}

/// A service that can turn a brief into a plan remotely.
///
/// Implementations perform exactly one request and must validate the reply
/// against the plan contract before returning it.
#[async_trait]
pub trait RemoteSynthesis: Send + Sync {
    async fn request_plan(
        &self,
        brief: &Brief,
        credential: &Credential,
        model: &str,
    ) -> Result<Plan, RemoteFailure>;
}

/// Run one bounded remote attempt.
///
/// The in-flight request is dropped when the deadline passes.
pub async fn synthesize(
    gateway: &dyn RemoteSynthesis,
    brief: &Brief,
    credential: Option<&Credential>,
    model: &str,
    deadline: Deadline,
) -> RemoteOutcome {
    let Some(credential) = credential else {
        debug!(state = %GatewayState::Idle, "No credential, remote synthesis skipped");
        return RemoteOutcome::Failed(RemoteFailure::NoCredential);
    };

    info!(
        state = %GatewayState::Requesting,
        model = %model,
        timeout_ms = deadline.remaining().as_millis() as u64,
        "Requesting remote plan"
    );
    let started = Instant::now();

    let result = tokio::time::timeout_at(
        deadline.instant(),
        gateway.request_plan(brief, credential, model),
    )
    .await
    .unwrap_or(Err(RemoteFailure::DeadlineElapsed));

    let elapsed = started.elapsed();
    metrics::record_remote_duration(elapsed.as_secs_f64());

    match result {
        Ok(plan) => {
            info!(
                state = %GatewayState::Succeeded,
                scenes = plan.scenes.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Remote plan accepted"
            );
            RemoteOutcome::Succeeded(plan)
        }
        Err(failure) => {
            warn!(
                state = %GatewayState::Failed,
                reason = failure.reason(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Remote synthesis failed: {}",
                failure
            );
            metrics::record_remote_failure(failure.reason());
            RemoteOutcome::Failed(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slow;

    #[async_trait]
    impl RemoteSynthesis for Slow {
        async fn request_plan(
            &self,
            _brief: &Brief,
            _credential: &Credential,
            _model: &str,
        ) -> Result<Plan, RemoteFailure> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(RemoteFailure::Transport("unreachable".to_string()))
        }
    }

    struct Rejecting;

    #[async_trait]
    impl RemoteSynthesis for Rejecting {
        async fn request_plan(
            &self,
            _brief: &Brief,
            _credential: &Credential,
            _model: &str,
        ) -> Result<Plan, RemoteFailure> {
            Err(RemoteFailure::Schema(SchemaError::NoScenes))
        }
    }

    #[test]
    fn test_credential_rejects_blank() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert_eq!(Credential::new(" sk-abc ").unwrap().expose(), "sk-abc");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk-secret").unwrap();
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_missing_credential_never_requests() {
        let outcome = synthesize(
            &Slow,
            &Brief::sample(),
            None,
            DEFAULT_MODEL,
            Deadline::standard(),
        )
        .await;
        assert_eq!(outcome, RemoteOutcome::Failed(RemoteFailure::NoCredential));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapses() {
        let credential = Credential::new("sk-test").unwrap();
        let outcome = synthesize(
            &Slow,
            &Brief::sample(),
            Some(&credential),
            DEFAULT_MODEL,
            Deadline::standard(),
        )
        .await;

        assert_eq!(outcome, RemoteOutcome::Failed(RemoteFailure::DeadlineElapsed));
        assert_eq!(outcome.state(), GatewayState::Failed);
    }

    #[tokio::test]
    async fn test_schema_failure_is_folded() {
        let credential = Credential::new("sk-test").unwrap();
        let outcome = synthesize(
            &Rejecting,
            &Brief::sample(),
            Some(&credential),
            DEFAULT_MODEL,
            Deadline::standard(),
        )
        .await;

        match outcome {
            RemoteOutcome::Failed(failure) => assert_eq!(failure.reason(), "schema"),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
