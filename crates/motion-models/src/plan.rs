//! Video production plan models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::brief::{AspectRatio, Brief, Platform};
use crate::scene::Scene;

/// Soundtrack direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Soundtrack {
    pub mood: String,
    pub tempo: String,
    pub instrumentation: String,
}

/// Prompts for generative image, voice and motion tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AiAssets {
    pub images: Vec<String>,

    pub voice: String,

    /// Motion prompts; the last entry is the rendered call-to-action frame.
    pub motion: Vec<String>,
}

/// Delivery metadata mirrored from the brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanMetadata {
    pub duration_seconds: u32,
    pub aspect_ratio: AspectRatio,
    pub platform: Platform,
}

impl PlanMetadata {
    pub fn from_brief(brief: &Brief) -> Self {
        Self {
            duration_seconds: brief.duration_seconds,
            aspect_ratio: brief.aspect_ratio,
            platform: brief.platform,
        }
    }
}

/// Complete multi-scene production plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Plan {
    pub summary: String,

    pub hook: String,

    pub narrative_arc: Vec<String>,

    pub scenes: Vec<Scene>,

    /// One caption per scene, or empty when captions are off
    pub captions: Vec<String>,

    pub soundtrack: Soundtrack,

    pub ai_assets: AiAssets,

    pub automation: Vec<String>,

    pub delivery_checklist: Vec<String>,

    pub metadata: PlanMetadata,
}

impl Plan {
    /// Sum of all scene durations in seconds.
    pub fn total_scene_duration(&self) -> u32 {
        self.scenes.iter().map(|s| s.duration).sum()
    }

    /// The motion prompt consumers render as the closing call-to-action.
    pub fn call_to_action_frame(&self) -> Option<&str> {
        self.ai_assets.motion.last().map(String::as_str)
    }
}
