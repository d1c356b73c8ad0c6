//! Synthesis error types.

use motion_models::BriefError;
use thiserror::Error;

use crate::gateway::RemoteFailure;

pub type SynthResult<T> = Result<T, SynthError>;

#[derive(Debug, Error)]
pub enum SynthError {
    /// The brief was rejected; no plan can be produced.
    #[error(transparent)]
    InvalidInput(#[from] BriefError),

    /// The remote path failed; always recovered by the deterministic path.
    #[error("Remote synthesis unavailable: {0}")]
    RemoteUnavailable(#[from] RemoteFailure),

    /// The deterministic path misbehaved; reported next to a best-effort plan.
    #[error("Failed to generate plan, returning deterministic fallback: {0}")]
    InternalSynthesisFailure(String),
}

impl SynthError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalSynthesisFailure(msg.into())
    }

    /// Whether the caller gets no plan at all.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SynthError::InvalidInput(_))
    }
}
