//! Deterministic scene composition.
//!
//! Turns a brief into an ordered shot list:
//! 1. pick a beat structure from the duration and platform ([`beat_sequence`])
//! 2. split the runtime across beats by weight ([`allocate_durations`])
//! 3. write every text field from the beat, tone, platform and brand keywords
//!
//! The output is a pure function of the brief.

use motion_models::{scene_id, Brief, Platform, Scene, Tone};

use crate::phrasebook::{lower_first, phrase, platform_framing, voice_for, ToneVoice};

/// No scene may be shorter than this.
pub const MIN_SCENE_SECONDS: u32 = 3;

/// Number of B-roll prompts generated per scene.
pub const BROLL_PER_SCENE: usize = 3;

/// A narrative beat of the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Beat {
    Hook,
    Problem,
    Reveal,
    Walkthrough,
    DeepDive,
    Proof,
    CallToAction,
}

impl Beat {
    pub fn title(&self) -> &'static str {
        match self {
            Beat::Hook => "Scroll-Stopping Hook",
            Beat::Problem => "The Problem",
            Beat::Reveal => "The Reveal",
            Beat::Walkthrough => "How It Works",
            Beat::DeepDive => "Feature Deep Dive",
            Beat::Proof => "Proof",
            Beat::CallToAction => "Call to Action",
        }
    }

    pub fn purpose(&self) -> &'static str {
        match self {
            Beat::Hook => "Earn attention in the opening seconds",
            Beat::Problem => "Name the pain the audience already feels",
            Beat::Reveal => "Introduce the product as the answer",
            Beat::Walkthrough => "Show the product working end to end",
            Beat::DeepDive => "Zoom in on the standout capability",
            Beat::Proof => "Back the promise with evidence",
            Beat::CallToAction => "Convert attention into the goal",
        }
    }

    /// Relative share of the runtime.
    fn weight(&self, platform: Platform) -> u32 {
        match self {
            Beat::Hook if platform.is_short_form() => 16,
            Beat::Hook => 12,
            Beat::Problem => 16,
            Beat::Reveal => 22,
            Beat::Walkthrough => 18,
            Beat::DeepDive => 16,
            Beat::Proof if platform.is_short_form() => 14,
            Beat::Proof => 18,
            Beat::CallToAction => 10,
        }
    }

    fn shot(&self) -> &'static str {
        match self {
            Beat::Hook => "Open on an extreme close-up that snaps to a wide",
            Beat::Problem => "Frustrated over-the-shoulder shots of the old workflow",
            Beat::Reveal => "Hero product reveal with a slow orbit",
            Beat::Walkthrough => "Screen-capture walkthrough intercut with reaction shots",
            Beat::DeepDive => "Macro detail shots of the key interaction",
            Beat::Proof => "Results on screen with animated counters and testimonials",
            Beat::CallToAction => "Logo lockup with the call-to-action front and centre",
        }
    }

    fn broll_subjects(&self) -> [&'static str; 2] {
        match self {
            Beat::Hook => ["split-second visual surprise", "bold typographic flash"],
            Beat::Problem => ["cluttered desk with stalled progress", "clock ticking past deadlines"],
            Beat::Reveal => ["product emerging from darkness", "first-use delight moment"],
            Beat::Walkthrough => ["hands using the product step by step", "interface close-ups"],
            Beat::DeepDive => ["macro shot of the standout feature", "before/after split screen"],
            Beat::Proof => ["happy customers on camera", "metrics climbing on a dashboard"],
            Beat::CallToAction => ["end card with brand colours", "cursor tapping the action button"],
        }
    }

    fn sound_cue(&self) -> &'static str {
        match self {
            Beat::Hook => "a riser that lands on",
            Beat::Problem => "muffled ambience broken by",
            Beat::Reveal => "a beat drop punctuated by",
            Beat::Walkthrough => "UI clicks layered under",
            Beat::DeepDive => "a filtered sweep into",
            Beat::Proof => "a rising pad capped by",
            Beat::CallToAction => "the full mix resolving on",
        }
    }
}

/// Beat structure for a runtime and platform.
///
/// | runtime | beats |
/// |---|---|
/// | up to 30s | Hook, Reveal, CTA (long-form platforms add Proof) |
/// | 31-60s | Hook, Problem, Reveal, Proof, CTA |
/// | 61-90s | adds Walkthrough after Reveal |
/// | over 90s | adds DeepDive after Walkthrough |
pub fn beat_sequence(duration_seconds: u32, platform: Platform) -> Vec<Beat> {
    use Beat::*;

    match duration_seconds {
        0..=30 if platform.is_short_form() => vec![Hook, Reveal, CallToAction],
        0..=30 => vec![Hook, Reveal, Proof, CallToAction],
        31..=60 => vec![Hook, Problem, Reveal, Proof, CallToAction],
        61..=90 => vec![Hook, Problem, Reveal, Walkthrough, Proof, CallToAction],
        _ => vec![Hook, Problem, Reveal, Walkthrough, DeepDive, Proof, CallToAction],
    }
}

/// Split `total` seconds across `weights` in whole seconds.
///
/// Uses largest-remainder apportionment so the result always sums to `total`
/// exactly (ties go to the earlier beat). Any scene under
/// [`MIN_SCENE_SECONDS`] is then topped up one second at a time from the
/// longest scene. Requires `total >= weights.len() * MIN_SCENE_SECONDS` for
/// the minimum to be reachable; otherwise the minimum is applied as far as
/// possible.
pub fn allocate_durations(total: u32, weights: &[u32]) -> Vec<u32> {
    let weight_sum: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if weights.is_empty() || weight_sum == 0 {
        return Vec::new();
    }

    let total_u64 = u64::from(total);
    let mut durations: Vec<u32> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(weights.len());
    for (index, weight) in weights.iter().enumerate() {
        let share = total_u64 * u64::from(*weight);
        durations.push((share / weight_sum) as u32);
        remainders.push((index, share % weight_sum));
    }

    let assigned: u32 = durations.iter().sum();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (index, _) in remainders.iter().take((total - assigned) as usize) {
        durations[*index] += 1;
    }

    while let Some(short) = durations.iter().position(|d| *d < MIN_SCENE_SECONDS) {
        let longest = longest_index(&durations);
        if durations[longest] <= MIN_SCENE_SECONDS {
            break;
        }
        durations[longest] -= 1;
        durations[short] += 1;
    }

    durations
}

fn longest_index(durations: &[u32]) -> usize {
    let mut best = 0;
    for (index, duration) in durations.iter().enumerate() {
        if *duration > durations[best] {
            best = index;
        }
    }
    best
}

/// Compose the ordered scene list for a brief.
pub fn compose_scenes(brief: &Brief) -> Vec<Scene> {
    let beats = beat_sequence(brief.duration_seconds, brief.platform);
    let weights: Vec<u32> = beats.iter().map(|b| b.weight(brief.platform)).collect();
    let durations = allocate_durations(brief.duration_seconds, &weights);
    let voice = voice_for(brief.tone);
    let count = beats.len();

    beats
        .iter()
        .zip(durations)
        .enumerate()
        .map(|(index, (beat, duration))| {
            let writer = SceneWriter {
                brief,
                voice: &voice,
                beat: *beat,
                index,
                is_last: index + 1 == count,
            };
            writer.scene(duration)
        })
        .collect()
}

struct SceneWriter<'a> {
    brief: &'a Brief,
    voice: &'a ToneVoice,
    beat: Beat,
    index: usize,
    is_last: bool,
}

impl SceneWriter<'_> {
    fn keyword(&self) -> &str {
        self.brief.keyword_at(self.index)
    }

    fn scene(&self, duration: u32) -> Scene {
        Scene {
            id: scene_id(self.index),
            title: self.beat.title().to_string(),
            purpose: self.beat.purpose().to_string(),
            duration,
            voiceover: self.voiceover(),
            on_screen_text: self.on_screen_text(),
            visual_direction: self.visual_direction(),
            transitions: self.transitions(),
            broll_ideas: self.broll_ideas(),
            sound_design: self.sound_design(),
        }
    }

    fn voiceover(&self) -> String {
        let b = self.brief;
        let keyword = self.keyword();
        match self.beat {
            Beat::Hook => format!(
                "{} {}, this one is for you.",
                self.voice.opener, b.target_audience
            ),
            Beat::Problem => format!(
                "You want to {}, but the usual tools keep getting in the way.",
                lower_first(phrase(&b.goal))
            ),
            Beat::Reveal => format!(
                "Meet the answer: {}. {} from the very first frame.",
                lower_first(phrase(&b.prompt)),
                keyword
            ),
            Beat::Walkthrough => format!(
                "Here's how it works: {} at every step, from first idea to finished result.",
                keyword
            ),
            Beat::DeepDive => format!(
                "Look closer. {} is what sets this apart for {}.",
                keyword,
                lower_first(&b.target_audience)
            ),
            Beat::Proof => format!(
                "Teams already rely on it to {}. {} isn't a promise, it's the product.",
                lower_first(phrase(&b.goal)),
                keyword
            ),
            Beat::CallToAction => format!(
                "{}. {}",
                phrase(&b.call_to_action),
                self.voice.closer
            ),
        }
    }

    fn on_screen_text(&self) -> String {
        let keyword = self.keyword();
        let text = match self.beat {
            Beat::Hook => format!("{} starts now", keyword),
            Beat::Problem => "Still doing it the hard way?".to_string(),
            Beat::Reveal => format!("Say hello to {}", keyword),
            Beat::Walkthrough => format!("{} in 3 steps", keyword),
            Beat::DeepDive => format!("Why {} wins", keyword),
            Beat::Proof => format!("Built for {}", self.brief.target_audience),
            Beat::CallToAction => phrase(&self.brief.call_to_action).to_string(),
        };

        match self.brief.tone {
            Tone::Bold => text.to_uppercase(),
            Tone::Playful => format!("{}!", phrase(&text)),
            _ => text,
        }
    }

    fn visual_direction(&self) -> String {
        let mut direction = format!(
            "{}; {}; {}.",
            self.beat.shot(),
            self.voice.energy,
            platform_framing(self.brief.platform)
        );
        if self.index == 0 && !self.brief.brand_keywords.is_empty() {
            direction.push_str(&format!(
                " Brand cues: {}.",
                self.brief.brand_keywords.join(" / ")
            ));
        }
        direction
    }

    fn transitions(&self) -> String {
        if self.is_last {
            format!(
                "{} into the end card; hold the final frame for the call-to-action",
                self.voice.transition
            )
        } else {
            format!("{} into scene {}", self.voice.transition, self.index + 2)
        }
    }

    fn broll_ideas(&self) -> Vec<String> {
        let [first, second] = self.beat.broll_subjects();
        let ideas = vec![
            format!("{} featuring {}", first, self.keyword()),
            format!("{} for {}", second, lower_first(&self.brief.target_audience)),
            format!(
                "{} texture shot, {}",
                self.brief.aspect_ratio,
                self.voice.energy
            ),
        ];
        debug_assert_eq!(ideas.len(), BROLL_PER_SCENE);
        ideas
    }

    fn sound_design(&self) -> String {
        format!("{} a {}", self.beat.sound_cue(), self.voice.accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_models::AspectRatio;

    fn brief(duration: u32, platform: Platform) -> Brief {
        Brief {
            duration_seconds: duration,
            platform,
            ..Brief::sample()
        }
    }

    #[test]
    fn test_beat_sequence_policy() {
        use Beat::*;
        assert_eq!(
            beat_sequence(20, Platform::TikTok),
            vec![Hook, Reveal, CallToAction]
        );
        assert_eq!(
            beat_sequence(30, Platform::LinkedIn),
            vec![Hook, Reveal, Proof, CallToAction]
        );
        assert_eq!(beat_sequence(45, Platform::TikTok).len(), 5);
        assert_eq!(beat_sequence(45, Platform::YouTube).len(), 5);
        assert_eq!(beat_sequence(90, Platform::InstagramReels).len(), 6);
        assert_eq!(beat_sequence(91, Platform::YouTube).len(), 7);
        for duration in [20, 45, 75, 150] {
            let beats = beat_sequence(duration, Platform::TikTok);
            assert_eq!(beats.first(), Some(&Hook));
            assert_eq!(beats.last(), Some(&CallToAction));
        }
    }

    #[test]
    fn test_allocation_sums_exactly() {
        assert_eq!(allocate_durations(20, &[16, 22, 10]), vec![7, 9, 4]);
        assert_eq!(allocate_durations(20, &[12, 22, 18, 10]), vec![4, 7, 6, 3]);
        for total in 20..=150 {
            let durations = allocate_durations(total, &[16, 16, 22, 18, 14, 10]);
            assert_eq!(durations.iter().sum::<u32>(), total);
        }
    }

    #[test]
    fn test_allocation_enforces_minimum_from_longest() {
        // Naive split of 12s over these weights gives [11, 0, 1, 0]
        let durations = allocate_durations(12, &[90, 2, 4, 4]);
        assert_eq!(durations.iter().sum::<u32>(), 12);
        assert!(durations.iter().all(|d| *d >= MIN_SCENE_SECONDS));
        assert_eq!(durations, vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_allocation_degenerate_inputs() {
        assert!(allocate_durations(30, &[]).is_empty());
        assert!(allocate_durations(30, &[0, 0]).is_empty());
        assert_eq!(allocate_durations(5, &[1, 1, 1]).iter().sum::<u32>(), 5);
    }

    #[test]
    fn test_compose_bold_tiktok_45() {
        let brief = Brief::sample();
        let scenes = compose_scenes(&brief);
        assert_eq!(scenes.len(), 5);
        assert_eq!(scenes.iter().map(|s| s.duration).sum::<u32>(), 45);
        assert_eq!(scenes[0].id, "scene-01");
        assert_eq!(scenes[4].id, "scene-05");
        assert_eq!(scenes[0].on_screen_text, "AI-NATIVE STARTS NOW");
        assert!(scenes[0].voiceover.starts_with("Stop scrolling."));
        assert!(scenes[0]
            .visual_direction
            .contains("Brand cues: AI-native / Kinetic / Conversion-first."));
        assert_eq!(scenes[4].on_screen_text, "JOIN THE WAITLIST");
        assert!(scenes.iter().all(|s| s.broll_ideas.len() == BROLL_PER_SCENE));
        assert!(scenes[4].transitions.contains("end card"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let brief = brief(120, Platform::YouTube);
        assert_eq!(compose_scenes(&brief), compose_scenes(&brief));
    }

    #[test]
    fn test_tone_changes_text() {
        let base = Brief::sample();
        let scenes = compose_scenes(&base);
        for tone in Tone::ALL.iter().filter(|t| **t != base.tone) {
            let other = Brief {
                tone: *tone,
                ..base.clone()
            };
            assert_ne!(compose_scenes(&other), scenes, "tone {tone}");
        }
    }

    #[test]
    fn test_keywords_change_text() {
        let base = Brief::sample();
        let scenes = compose_scenes(&base);

        let mut extra = base.clone();
        extra.brand_keywords.push("Fast".to_string());
        assert_ne!(compose_scenes(&extra), scenes);

        let mut none = base.clone();
        none.brand_keywords.clear();
        let plain = compose_scenes(&none);
        assert_ne!(plain, scenes);
        assert!(plain[0].on_screen_text.contains("TIKTOK"));
    }

    #[test]
    fn test_ids_unique() {
        let scenes = compose_scenes(&brief(150, Platform::LinkedIn));
        let ids: std::collections::HashSet<_> = scenes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), scenes.len());
    }

    #[test]
    fn test_aspect_ratio_in_broll() {
        let brief = Brief {
            aspect_ratio: AspectRatio::Landscape,
            ..Brief::sample()
        };
        let scenes = compose_scenes(&brief);
        assert!(scenes[0].broll_ideas[2].starts_with("16:9"));
    }
}
