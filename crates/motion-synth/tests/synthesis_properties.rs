//! Property tests for deterministic synthesis.

use motion_models::{check_plan, AspectRatio, Brief, Platform, Tone};
use motion_synth::{assemble_plan, compose_scenes, deterministic, MIN_SCENE_SECONDS};
use proptest::prelude::*;
use serde_json::json;

// -- Strategy helpers --

fn arb_tone() -> impl Strategy<Value = Tone> {
    prop::sample::select(Tone::ALL.to_vec())
}

fn arb_platform() -> impl Strategy<Value = Platform> {
    prop::sample::select(Platform::ALL.to_vec())
}

fn arb_aspect_ratio() -> impl Strategy<Value = AspectRatio> {
    prop::sample::select(AspectRatio::ALL.to_vec())
}

fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.-]{0,40}"
}

fn arb_brief() -> impl Strategy<Value = Brief> {
    (
        (arb_text(), arb_text(), arb_text(), arb_text()),
        arb_tone(),
        arb_platform(),
        20u32..=150,
        arb_aspect_ratio(),
        prop::collection::vec("[A-Za-z-]{0,12}", 0..6),
        any::<bool>(),
    )
        .prop_map(
            |((prompt, audience, goal, cta), tone, platform, duration, ratio, keywords, captions)| {
                let input = json!({
                    "prompt": prompt,
                    "targetAudience": audience,
                    "goal": goal,
                    "tone": tone,
                    "platform": platform,
                    "durationSeconds": duration,
                    "aspectRatio": ratio,
                    "brandKeywords": keywords,
                    "callToAction": cta,
                    "includeCaptions": captions,
                });
                Brief::from_value(input).expect("generated brief is valid")
            },
        )
}

proptest! {
    #[test]
    fn scene_durations_sum_exactly(brief in arb_brief()) {
        let scenes = compose_scenes(&brief);
        prop_assert!(!scenes.is_empty());
        prop_assert!(scenes.iter().all(|s| s.duration >= MIN_SCENE_SECONDS));
        let total: u32 = scenes.iter().map(|s| s.duration).sum();
        prop_assert_eq!(total, brief.duration_seconds);
    }

    #[test]
    fn assembled_plan_passes_contract(brief in arb_brief()) {
        let plan = assemble_plan(&brief, compose_scenes(&brief));
        prop_assert!(check_plan(&plan).is_ok());
        prop_assert_eq!(plan.captions.is_empty(), !brief.include_captions);
        prop_assert_eq!(plan.metadata.duration_seconds, brief.duration_seconds);
        prop_assert_eq!(plan.metadata.platform, brief.platform);
        prop_assert_eq!(plan.metadata.aspect_ratio, brief.aspect_ratio);

        // Survives the same strict parse a remote reply goes through.
        let text = serde_json::to_string(&plan).unwrap();
        prop_assert_eq!(motion_models::parse_plan(&text).unwrap(), plan);
    }

    #[test]
    fn deterministic_path_is_stable(brief in arb_brief()) {
        let first = deterministic(&brief);
        let second = deterministic(&brief);
        prop_assert!(first.error.is_none());
        prop_assert!(!first.used_remote);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tone_change_alters_text(brief in arb_brief(), other in arb_tone()) {
        prop_assume!(other != brief.tone);
        let mut changed = brief.clone();
        changed.tone = other;
        prop_assert_ne!(compose_scenes(&brief), compose_scenes(&changed));
    }
}
