//! Deterministic plan assembly from a brief and its composed scenes.

use motion_models::{AiAssets, Brief, Plan, PlanMetadata, Platform, Scene, Soundtrack, Tone};

use crate::phrasebook::{lower_first, phrase, platform_framing, publish_step, voice_for};

/// Soundtrack direction for a tone.
pub fn soundtrack_for(tone: Tone) -> Soundtrack {
    let (mood, tempo, instrumentation) = match tone {
        Tone::Bold => (
            "Confident and charged",
            "128 BPM driving four-on-the-floor",
            "Distorted synth bass, punchy 808s, gated snares and riser FX",
        ),
        Tone::Friendly => (
            "Warm and upbeat",
            "105 BPM bouncy groove",
            "Acoustic guitar, hand claps, light glockenspiel and soft bass",
        ),
        Tone::Inspirational => (
            "Uplifting and expansive",
            "90 BPM building to 120 BPM",
            "Felt piano, swelling strings, cinematic percussion and airy pads",
        ),
        Tone::Playful => (
            "Cheeky and bright",
            "115 BPM syncopated bounce",
            "Pizzicato strings, marimba, whistles and toy percussion",
        ),
        Tone::Serious => (
            "Focused and assured",
            "80 BPM steady pulse",
            "Low cello drones, muted piano and restrained percussion",
        ),
    };

    Soundtrack {
        mood: mood.to_string(),
        tempo: tempo.to_string(),
        instrumentation: instrumentation.to_string(),
    }
}

/// Assemble the full plan around composed scenes.
pub fn assemble_plan(brief: &Brief, scenes: Vec<Scene>) -> Plan {
    let voice = voice_for(brief.tone);

    let summary = format!(
        "A {}-second {} {} spot for {}: {}. Goal: {}.",
        brief.duration_seconds,
        brief.tone,
        brief.platform,
        lower_first(&brief.target_audience),
        phrase(&brief.prompt),
        lower_first(phrase(&brief.goal))
    );

    let hook = format!(
        "{} {}, built to {}.",
        voice.opener,
        phrase(&brief.prompt),
        lower_first(phrase(&brief.goal))
    );

    let narrative_arc = scenes
        .iter()
        .map(|s| format!("{}: {}", s.title, s.purpose))
        .collect();

    let captions = if brief.include_captions {
        scenes.iter().map(|s| s.on_screen_text.clone()).collect()
    } else {
        Vec::new()
    };

    let ai_assets = AiAssets {
        images: image_prompts(brief),
        voice: format!(
            "{} narrator speaking to {}, paced for {} seconds",
            voice.delivery,
            lower_first(&brief.target_audience),
            brief.duration_seconds
        ),
        motion: motion_prompts(brief, &scenes),
    };

    Plan {
        summary,
        hook,
        narrative_arc,
        captions,
        soundtrack: soundtrack_for(brief.tone),
        ai_assets,
        automation: automation_steps(brief, scenes.len()),
        delivery_checklist: delivery_checklist(brief),
        metadata: PlanMetadata::from_brief(brief),
        scenes,
    }
}

/// Single-scene plan used when full composition is unavailable.
pub fn minimal_plan(brief: &Brief) -> Plan {
    let scene = Scene {
        id: motion_models::scene_id(0),
        title: "Full Spot".to_string(),
        purpose: brief.goal.clone(),
        duration: brief.duration_seconds,
        voiceover: format!("{}. {}", phrase(&brief.prompt), brief.call_to_action),
        on_screen_text: brief.call_to_action.clone(),
        visual_direction: platform_framing(brief.platform).to_string(),
        transitions: "Hold on the final frame".to_string(),
        broll_ideas: vec![brief.prompt.clone()],
        sound_design: "Music bed throughout".to_string(),
    };

    Plan {
        summary: brief.prompt.clone(),
        hook: brief.prompt.clone(),
        narrative_arc: vec![format!("{}: {}", scene.title, scene.purpose)],
        captions: if brief.include_captions {
            vec![scene.on_screen_text.clone()]
        } else {
            Vec::new()
        },
        soundtrack: soundtrack_for(brief.tone),
        ai_assets: AiAssets {
            images: vec![brief.prompt.clone()],
            voice: voice_for(brief.tone).delivery.to_string(),
            motion: vec![end_card(brief)],
        },
        automation: vec![publish_step(brief.platform).to_string()],
        delivery_checklist: vec![format!("Runtime is {} seconds", brief.duration_seconds)],
        metadata: PlanMetadata::from_brief(brief),
        scenes: vec![scene],
    }
}

fn image_prompts(brief: &Brief) -> Vec<String> {
    let voice = voice_for(brief.tone);
    let mut images: Vec<String> = if brief.brand_keywords.is_empty() {
        vec![format!(
            "{} hero still of {} for {}, {}",
            brief.aspect_ratio,
            lower_first(phrase(&brief.prompt)),
            brief.platform,
            voice.energy
        )]
    } else {
        brief
            .brand_keywords
            .iter()
            .map(|keyword| {
                format!(
                    "{} hero still expressing \"{}\" for {}, {}",
                    brief.aspect_ratio, keyword, brief.platform, voice.energy
                )
            })
            .collect()
    };

    images.push(format!(
        "{} cover frame: {} with the headline \"{}\"",
        brief.platform,
        platform_framing(brief.platform),
        phrase(&brief.call_to_action)
    ));
    images
}

fn motion_prompts(brief: &Brief, scenes: &[Scene]) -> Vec<String> {
    let mut motion: Vec<String> = scenes
        .iter()
        .map(|s| {
            format!(
                "{}: kinetic type animating \"{}\" over {}s, exit with {}",
                s.id,
                s.on_screen_text,
                s.duration,
                lower_first(voice_for(brief.tone).transition)
            )
        })
        .collect();

    // Consumers render the last entry as the closing call-to-action.
    motion.push(end_card(brief));
    motion
}

fn end_card(brief: &Brief) -> String {
    let keywords = if brief.brand_keywords.is_empty() {
        String::new()
    } else {
        format!(" in a {} style", brief.brand_keywords.join(", "))
    };
    format!(
        "End card: \"{}\" animated lockup with logo resolve{}, sized {} for {}",
        phrase(&brief.call_to_action),
        keywords,
        brief.aspect_ratio,
        brief.platform
    )
}

fn automation_steps(brief: &Brief, scene_count: usize) -> Vec<String> {
    let (width, height) = brief.aspect_ratio.resolution();
    let mut steps = vec![
        format!(
            "Generate {} scene clips at {}x{} ({}) from the B-roll and motion prompts",
            scene_count, width, height, brief.aspect_ratio
        ),
        "Synthesize the voiceover from the scene scripts and align it to scene timings"
            .to_string(),
        "Lay the soundtrack under the voiceover with sidechain ducking".to_string(),
    ];

    if brief.include_captions {
        steps.push(format!(
            "Transcribe the voiceover and burn in {}-styled captions",
            brief.platform
        ));
    } else {
        steps.push("Skip the caption pass and export a clean feed".to_string());
    }

    steps.push(publish_step(brief.platform).to_string());
    steps.push("Record plan metadata alongside the upload for performance review".to_string());
    steps
}

fn delivery_checklist(brief: &Brief) -> Vec<String> {
    let (width, height) = brief.aspect_ratio.resolution();
    let mut checklist = vec![
        format!("Runtime is exactly {} seconds", brief.duration_seconds),
        format!("Frame is {} at {}x{}", brief.aspect_ratio, width, height),
        format!(
            "Call to action \"{}\" is visible on the end card",
            phrase(&brief.call_to_action)
        ),
    ];

    checklist.push(
        match brief.platform {
            Platform::TikTok | Platform::InstagramReels | Platform::YouTubeShorts => {
                "On-screen text stays clear of the bottom and right-hand UI safe zones"
            }
            Platform::LinkedIn => "The story still lands with sound off in the feed",
            Platform::YouTube => "Thumbnail and title are tested against the opening frame",
        }
        .to_string(),
    );

    if brief.include_captions {
        checklist.push("Captions are proofread and synced to the voiceover".to_string());
    } else {
        checklist.push("Captions are intentionally disabled for this cut".to_string());
    }

    if !brief.brand_keywords.is_empty() {
        checklist.push(format!(
            "Brand keywords appear on screen: {}",
            brief.brand_keywords.join(", ")
        ));
    }

    checklist
}
