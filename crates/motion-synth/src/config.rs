//! Synthesis configuration.

use crate::gateway::DEFAULT_MODEL;

/// Remote synthesis configuration.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Base URL of the OpenAI-compatible API (no trailing slash)
    pub openai_base_url: String,
    /// Model used when a request does not name one
    pub default_model: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            openai_base_url: "https://api.openai.com".to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl SynthConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            default_model: std::env::var("OPENAI_DEFAULT_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.default_model),
        }
    }

    /// Model to use for a request, falling back to the default.
    pub fn model_or_default(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_or_default() {
        let config = SynthConfig::default();
        assert_eq!(config.model_or_default(None), "gpt-4.1-mini");
        assert_eq!(config.model_or_default(Some("  ")), "gpt-4.1-mini");
        assert_eq!(config.model_or_default(Some("gpt-4o")), "gpt-4o");
    }
}
