//! Scene (timed beat) model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One timed beat of a plan's shot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scene {
    /// Unique within a plan (`scene-01`, `scene-02`, ...)
    pub id: String,

    pub title: String,

    /// What the beat has to achieve
    pub purpose: String,

    /// Length in whole seconds
    pub duration: u32,

    pub voiceover: String,

    pub on_screen_text: String,

    pub visual_direction: String,

    pub transitions: String,

    /// Generation prompts for supporting footage
    pub broll_ideas: Vec<String>,

    pub sound_design: String,
}

/// Index-derived scene id, 1-based.
pub fn scene_id(index: usize) -> String {
    format!("scene-{:02}", index + 1)
}
