//! Tone and platform vocabulary shared by the composer and assembler.

use motion_models::{Platform, Tone};

/// Copy and direction vocabulary for one tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneVoice {
    /// First words of the hook line
    pub opener: &'static str,
    /// Camera and edit energy
    pub energy: &'static str,
    /// Narrator delivery
    pub delivery: &'static str,
    /// Default cut between scenes
    pub transition: &'static str,
    /// Signature sound accent
    pub accent: &'static str,
    /// Closing line after the call-to-action
    pub closer: &'static str,
}

pub fn voice_for(tone: Tone) -> ToneVoice {
    match tone {
        Tone::Bold => ToneVoice {
            opener: "Stop scrolling.",
            energy: "high-contrast lighting, aggressive push-ins and whip pans",
            delivery: "Punchy, declarative",
            transition: "Hard cut on the downbeat",
            accent: "sub-bass impact",
            closer: "No second chances.",
        },
        Tone::Friendly => ToneVoice {
            opener: "Hey there!",
            energy: "soft daylight, handheld warmth and easy smiles",
            delivery: "Warm, conversational",
            transition: "Gentle slide",
            accent: "bright pluck",
            closer: "We'd love to see you there.",
        },
        Tone::Inspirational => ToneVoice {
            opener: "Imagine this.",
            energy: "golden-hour light, slow dolly moves and wide horizons",
            delivery: "Uplifting, measured",
            transition: "Light-leak dissolve",
            accent: "swelling string hit",
            closer: "Your next chapter starts here.",
        },
        Tone::Playful => ToneVoice {
            opener: "Okay, plot twist!",
            energy: "saturated colour pops, bouncy zooms and sticker-style overlays",
            delivery: "Cheeky, upbeat",
            transition: "Cartoon wipe",
            accent: "boing pop",
            closer: "Go on, you know you want to.",
        },
        Tone::Serious => ToneVoice {
            opener: "Here are the facts.",
            energy: "controlled studio lighting, locked-off frames and slow reveals",
            delivery: "Calm, authoritative",
            transition: "Clean cut",
            accent: "low piano note",
            closer: "The decision is yours.",
        },
    }
}

/// How shots should be framed for a platform's feed.
pub fn platform_framing(platform: Platform) -> &'static str {
    match platform {
        Platform::TikTok => "native creator-style framing with centred subjects",
        Platform::InstagramReels => "polished vertical framing with aesthetic colour grading",
        Platform::YouTubeShorts => "tight vertical framing with loop-friendly endings",
        Platform::LinkedIn => "clean professional framing that reads with sound off",
        Platform::YouTube => "cinematic widescreen framing with room for lower thirds",
    }
}

/// Publishing step for a platform.
pub fn publish_step(platform: Platform) -> &'static str {
    match platform {
        Platform::TikTok => {
            "Export H.264 MP4 and queue it in the TikTok scheduler after a trending-sound check"
        }
        Platform::InstagramReels => {
            "Export H.264 MP4 and schedule through Meta Business Suite with a custom cover frame"
        }
        Platform::YouTubeShorts => "Publish through YouTube Studio with the #Shorts tag",
        Platform::LinkedIn => "Upload natively to LinkedIn and pin a first comment with the link",
        Platform::YouTube => "Upload to YouTube with chapters generated from the narrative arc",
    }
}

/// Lowercase the first character, for splicing a phrase into a sentence.
pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop trailing sentence punctuation so a phrase can be embedded.
pub fn phrase(text: &str) -> &str {
    text.trim_end_matches(['.', '!', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tone_has_a_distinct_voice() {
        let openers: std::collections::HashSet<_> =
            Tone::ALL.iter().map(|t| voice_for(*t).opener).collect();
        assert_eq!(openers.len(), Tone::ALL.len());
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Drive sign-ups"), "drive sign-ups");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_phrase() {
        assert_eq!(phrase("Join the waitlist!"), "Join the waitlist");
        assert_eq!(phrase("Done"), "Done");
    }
}
