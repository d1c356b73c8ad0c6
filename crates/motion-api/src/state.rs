//! Application state.

use std::sync::Arc;

use motion_synth::{Orchestrator, RemoteSynthesis, SynthConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub orchestrator: Orchestrator,
}

impl AppState {
    /// Create state backed by the configured OpenAI endpoint.
    pub fn new(config: ApiConfig, synth: SynthConfig) -> Self {
        Self {
            config,
            orchestrator: Orchestrator::from_config(synth),
        }
    }

    /// Create state with a custom remote gateway.
    pub fn with_gateway(config: ApiConfig, synth: SynthConfig, gateway: Arc<dyn RemoteSynthesis>) -> Self {
        Self {
            config,
            orchestrator: Orchestrator::new(gateway, synth),
        }
    }
}
