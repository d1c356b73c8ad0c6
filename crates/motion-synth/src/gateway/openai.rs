//! OpenAI Responses API client for plan synthesis.

use async_trait::async_trait;
use motion_models::{parse_plan, plan_json_schema, Brief, Plan};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{Credential, RemoteFailure, RemoteSynthesis};
use crate::config::SynthConfig;

const SCHEMA_NAME: &str = "AgentPlan";

/// Upstream error bodies are cut to this many bytes before being kept.
const MAX_ERROR_BODY_BYTES: usize = 512;

const SYSTEM_DIRECTIVE: &str = "You are MotionDirector, a creative director for short \
motion-graphics marketing videos. Turn the brief into a production plan with a scroll-stopping \
hook, tightly paced scenes whose durations add up to the requested length, kinetic typography \
cues, B-roll prompts and a clear call to action. Reply only with JSON that matches the schema.";

/// Remote synthesis backed by the OpenAI Responses API.
#[derive(Clone)]
pub struct OpenAiGateway {
    base_url: String,
    client: Client,
}

/// Responses API request.
#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage>,
    text: TextOptions,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct TextOptions {
    format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    schema: Value,
    strict: bool,
}

/// Responses API reply. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    /// First `output_text` item across all output messages.
    fn output_text(&self) -> Option<&str> {
        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .find(|c| c.kind == "output_text")
            .and_then(|c| c.text.as_deref())
    }
}

impl OpenAiGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &SynthConfig) -> Self {
        Self::new(config.openai_base_url.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/responses", self.base_url)
    }

    fn build_request<'a>(brief: &Brief, model: &'a str) -> Result<ResponsesRequest<'a>, RemoteFailure> {
        let brief_json = serde_json::to_string_pretty(brief)
            .map_err(|e| RemoteFailure::Transport(format!("Failed to encode brief: {}", e)))?;
        let schema = plan_json_schema()
            .map_err(|e| RemoteFailure::Transport(format!("Failed to encode plan schema: {}", e)))?;

        Ok(ResponsesRequest {
            model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: SYSTEM_DIRECTIVE.to_string(),
                },
                InputMessage {
                    role: "user",
                    content: format!("Produce a launch-ready motion plan for this brief:\n{}", brief_json),
                },
            ],
            text: TextOptions {
                format: ResponseFormat {
                    kind: "json_schema",
                    name: SCHEMA_NAME,
                    schema,
                    strict: true,
                },
            },
        })
    }
}

#[async_trait]
impl RemoteSynthesis for OpenAiGateway {
    async fn request_plan(
        &self,
        brief: &Brief,
        credential: &Credential,
        model: &str,
    ) -> Result<Plan, RemoteFailure> {
        let request = Self::build_request(brief, model)?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteFailure::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteFailure::Status {
                status: status.as_u16(),
                body: truncate_body(body, MAX_ERROR_BODY_BYTES),
            });
        }

        let reply: ResponsesReply = response
            .json()
            .await
            .map_err(|e| RemoteFailure::MalformedReply(e.to_string()))?;

        let text = reply
            .output_text()
            .ok_or_else(|| RemoteFailure::MalformedReply("No text output in reply".to_string()))?;

        debug!(bytes = text.len(), "Parsing remote plan");
        Ok(parse_plan(text)?)
    }
}

/// Cut `body` to at most `limit` bytes on a char boundary.
fn truncate_body(mut body: String, limit: usize) -> String {
    if body.len() > limit {
        let mut end = limit;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
