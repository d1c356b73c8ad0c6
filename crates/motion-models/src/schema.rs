//! Structural contract for plans.
//!
//! Every plan, whether assembled locally or returned by a remote model, passes
//! through here before it is trusted. Parsing is strict: unknown fields at any
//! level, missing fields and wrong element kinds are all rejected.

use std::collections::HashSet;

use schemars::gen::SchemaSettings;
use serde_json::Value;
use thiserror::Error;

use crate::plan::Plan;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Plan does not match the structural contract: {0}")]
    Structure(String),

    #[error("Plan has no scenes")]
    NoScenes,

    #[error("Plan has no motion prompts")]
    NoMotion,

    #[error("Scene {0} has zero duration")]
    ZeroDuration(String),

    #[error("Duplicate scene id: {0}")]
    DuplicateSceneId(String),
}

/// Parse plan text, tolerating a surrounding markdown code fence.
pub fn parse_plan(text: &str) -> SchemaResult<Plan> {
    let plan: Plan = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| SchemaError::Structure(e.to_string()))?;
    check_plan(&plan)?;
    Ok(plan)
}

/// Parse an already-decoded JSON value as a plan.
pub fn parse_plan_value(value: Value) -> SchemaResult<Plan> {
    let plan: Plan =
        serde_json::from_value(value).map_err(|e| SchemaError::Structure(e.to_string()))?;
    check_plan(&plan)?;
    Ok(plan)
}

/// Check the invariants the type system cannot express.
pub fn check_plan(plan: &Plan) -> SchemaResult<()> {
    if plan.scenes.is_empty() {
        return Err(SchemaError::NoScenes);
    }
    if plan.ai_assets.motion.is_empty() {
        return Err(SchemaError::NoMotion);
    }

    let mut ids = HashSet::new();
    for scene in &plan.scenes {
        if scene.duration == 0 {
            return Err(SchemaError::ZeroDuration(scene.id.clone()));
        }
        if !ids.insert(scene.id.as_str()) {
            return Err(SchemaError::DuplicateSceneId(scene.id.clone()));
        }
    }

    Ok(())
}

/// JSON Schema for [`Plan`], suitable for structured-output requests.
///
/// Nested objects are inlined, every property is required and no object
/// admits additional properties.
pub fn plan_json_schema() -> serde_json::Result<Value> {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
        })
        .into_generator();
    let root = generator.into_root_schema_for::<Plan>();

    let mut schema = serde_json::to_value(root)?;
    strip_unsupported_keywords(&mut schema);
    Ok(schema)
}

/// Remove keywords structured-output endpoints reject (`format` on integers,
/// numeric bounds, draft metadata).
fn strip_unsupported_keywords(schema: &mut Value) {
    let Some(obj) = schema.as_object_mut() else {
        return;
    };

    for key in ["$schema", "title", "definitions", "format", "minimum"] {
        obj.remove(key);
    }

    if let Some(Value::Object(properties)) = obj.get_mut("properties") {
        for property in properties.values_mut() {
            strip_unsupported_keywords(property);
        }
    }
    if let Some(items) = obj.get_mut("items") {
        strip_unsupported_keywords(items);
    }
    for key in ["anyOf", "allOf", "oneOf"] {
        if let Some(Value::Array(variants)) = obj.get_mut(key) {
            for variant in variants {
                strip_unsupported_keywords(variant);
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{AspectRatio, Platform};
    use crate::plan::{AiAssets, PlanMetadata, Soundtrack};
    use crate::scene::{scene_id, Scene};
    use serde_json::json;

    fn scene(index: usize, duration: u32) -> Scene {
        Scene {
            id: scene_id(index),
            title: format!("Beat {}", index + 1),
            purpose: "Move the story".to_string(),
            duration,
            voiceover: "Line".to_string(),
            on_screen_text: "Text".to_string(),
            visual_direction: "Push in".to_string(),
            transitions: "Cut".to_string(),
            broll_ideas: vec!["Hands on keyboard".to_string()],
            sound_design: "Whoosh".to_string(),
        }
    }

    fn plan() -> Plan {
        Plan {
            summary: "Summary".to_string(),
            hook: "Hook".to_string(),
            narrative_arc: vec!["Hook".to_string(), "CTA".to_string()],
            scenes: vec![scene(0, 10), scene(1, 20)],
            captions: vec!["Text".to_string(), "Text".to_string()],
            soundtrack: Soundtrack {
                mood: "Driving".to_string(),
                tempo: "128 BPM".to_string(),
                instrumentation: "Synths".to_string(),
            },
            ai_assets: AiAssets {
                images: vec!["Hero frame".to_string()],
                voice: "Confident".to_string(),
                motion: vec!["Logo resolve".to_string(), "End card".to_string()],
            },
            automation: vec!["Render".to_string()],
            delivery_checklist: vec!["Check safe zones".to_string()],
            metadata: PlanMetadata {
                duration_seconds: 30,
                aspect_ratio: AspectRatio::Portrait,
                platform: Platform::TikTok,
            },
        }
    }

    #[test]
    fn test_valid_plan_round_trips() {
        let text = serde_json::to_string(&plan()).unwrap();
        assert_eq!(parse_plan(&text).unwrap(), plan());
    }

    #[test]
    fn test_code_fence_tolerated() {
        let text = format!("```json\n{}\n```", serde_json::to_string(&plan()).unwrap());
        assert!(parse_plan(&text).is_ok());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut value = serde_json::to_value(plan()).unwrap();
        value.as_object_mut().unwrap().remove("deliveryChecklist");
        assert!(matches!(
            parse_plan_value(value),
            Err(SchemaError::Structure(msg)) if msg.contains("deliveryChecklist")
        ));
    }

    #[test]
    fn test_unexpected_field_rejected() {
        let mut value = serde_json::to_value(plan()).unwrap();
        value["notes"] = json!("extra");
        assert!(matches!(parse_plan_value(value), Err(SchemaError::Structure(_))));

        let mut value = serde_json::to_value(plan()).unwrap();
        value["scenes"][0]["cameraAngle"] = json!("low");
        assert!(matches!(parse_plan_value(value), Err(SchemaError::Structure(_))));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let mut value = serde_json::to_value(plan()).unwrap();
        value["scenes"][0]["brollIdeas"] = json!([1, 2]);
        assert!(matches!(parse_plan_value(value), Err(SchemaError::Structure(_))));

        let mut value = serde_json::to_value(plan()).unwrap();
        value["scenes"][0]["duration"] = json!(-4);
        assert!(matches!(parse_plan_value(value), Err(SchemaError::Structure(_))));

        let mut value = serde_json::to_value(plan()).unwrap();
        value["metadata"]["platform"] = json!("Vimeo");
        assert!(matches!(parse_plan_value(value), Err(SchemaError::Structure(_))));
    }

    #[test]
    fn test_malformed_text_rejected() {
        assert!(matches!(parse_plan("not json"), Err(SchemaError::Structure(_))));
        assert!(matches!(parse_plan(""), Err(SchemaError::Structure(_))));
    }

    #[test]
    fn test_invariants() {
        let mut p = plan();
        p.scenes.clear();
        assert_eq!(check_plan(&p), Err(SchemaError::NoScenes));

        let mut p = plan();
        p.ai_assets.motion.clear();
        assert_eq!(check_plan(&p), Err(SchemaError::NoMotion));

        let mut p = plan();
        p.scenes[1].duration = 0;
        assert_eq!(check_plan(&p), Err(SchemaError::ZeroDuration("scene-02".to_string())));

        let mut p = plan();
        p.scenes[1].id = "scene-01".to_string();
        assert_eq!(
            check_plan(&p),
            Err(SchemaError::DuplicateSceneId("scene-01".to_string()))
        );
    }

    #[test]
    fn test_json_schema_contract() {
        let schema = plan_json_schema().unwrap();
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("definitions").is_none());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in [
            "summary",
            "hook",
            "narrativeArc",
            "scenes",
            "captions",
            "soundtrack",
            "aiAssets",
            "automation",
            "deliveryChecklist",
            "metadata",
        ] {
            assert!(required.contains(&field), "{field} should be required");
        }

        let scene = &schema["properties"]["scenes"]["items"];
        assert_eq!(scene["type"], "object");
        assert_eq!(scene["additionalProperties"], false);
        assert_eq!(scene["required"].as_array().unwrap().len(), 10);
        assert_eq!(scene["properties"]["duration"]["type"], "integer");
        assert!(scene["properties"]["duration"].get("format").is_none());
        assert!(scene["properties"]["duration"].get("minimum").is_none());
        assert_eq!(scene["properties"]["title"]["type"], "string");

        let metadata = &schema["properties"]["metadata"];
        assert_eq!(metadata["additionalProperties"], false);
        assert_eq!(
            metadata["properties"]["platform"]["enum"].as_array().unwrap().len(),
            5
        );
        assert_eq!(
            schema["properties"]["aiAssets"]["properties"]["motion"]["items"]["type"],
            "string"
        );
    }
}
