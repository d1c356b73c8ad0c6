//! Creative brief models and input validation.
//!
//! A [`Brief`] is only ever built through [`Brief::from_value`], which turns an
//! untrusted JSON payload into the canonical, trimmed form the synthesizers
//! rely on.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Shortest supported video, in seconds.
pub const MIN_DURATION_SECONDS: u32 = 20;

/// Longest supported video, in seconds.
pub const MAX_DURATION_SECONDS: u32 = 150;

/// Creative tone of the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Bold,
    Friendly,
    Inspirational,
    Playful,
    Serious,
}

impl Tone {
    pub const ALL: &'static [Tone] = &[
        Tone::Bold,
        Tone::Friendly,
        Tone::Inspirational,
        Tone::Playful,
        Tone::Serious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Bold => "bold",
            Tone::Friendly => "friendly",
            Tone::Inspirational => "inspirational",
            Tone::Playful => "playful",
            Tone::Serious => "serious",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distribution platform the video is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Platform {
    #[serde(rename = "TikTok")]
    TikTok,
    #[serde(rename = "Instagram Reels")]
    InstagramReels,
    #[serde(rename = "YouTube Shorts")]
    YouTubeShorts,
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    #[serde(rename = "YouTube")]
    YouTube,
}

impl Platform {
    pub const ALL: &'static [Platform] = &[
        Platform::TikTok,
        Platform::InstagramReels,
        Platform::YouTubeShorts,
        Platform::LinkedIn,
        Platform::YouTube,
    ];

    /// Display name, identical to the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::InstagramReels => "Instagram Reels",
            Platform::YouTubeShorts => "YouTube Shorts",
            Platform::LinkedIn => "LinkedIn",
            Platform::YouTube => "YouTube",
        }
    }

    /// Vertical, feed-scrolling platforms where the first seconds decide retention.
    pub fn is_short_form(&self) -> bool {
        matches!(
            self,
            Platform::TikTok | Platform::InstagramReels | Platform::YouTubeShorts
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output frame shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AspectRatio {
    // 9:16 for TikTok/Reels/Shorts
    #[serde(rename = "9:16")]
    Portrait,
    // 1:1 feed square
    #[serde(rename = "1:1")]
    Square,
    // 16:9 widescreen
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub const ALL: &'static [AspectRatio] = &[
        AspectRatio::Portrait,
        AspectRatio::Square,
        AspectRatio::Landscape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
        }
    }

    /// Delivery resolution (width, height) for this ratio.
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            AspectRatio::Portrait => (1080, 1920),
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Landscape => (1920, 1080),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Brief validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BriefError {
    /// Missing field, wrong kind, unknown enum value, or blank text.
    #[error("Invalid brief: {0}")]
    InvalidInput(String),

    #[error("durationSeconds {value} is outside the supported range {min}..={max}")]
    OutOfRange { value: i128, min: u32, max: u32 },
}

impl BriefError {
    fn out_of_range(value: impl Into<i128>) -> Self {
        Self::OutOfRange {
            value: value.into(),
            min: MIN_DURATION_SECONDS,
            max: MAX_DURATION_SECONDS,
        }
    }

    fn from_validation(errors: &ValidationErrors, duration_seconds: u32) -> Self {
        let fields = errors.field_errors();
        if fields.contains_key("duration_seconds") {
            return Self::out_of_range(duration_seconds);
        }

        let mut names: Vec<String> = fields.keys().map(|k| camel_case(k)).collect();
        names.sort();
        Self::InvalidInput(format!("blank required field(s): {}", names.join(", ")))
    }
}

/// Canonical, validated creative brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    /// What is being launched or promoted
    #[validate(length(min = 1))]
    pub prompt: String,

    #[validate(length(min = 1))]
    pub target_audience: String,

    #[validate(length(min = 1))]
    pub goal: String,

    pub tone: Tone,

    pub platform: Platform,

    #[validate(range(min = MIN_DURATION_SECONDS, max = MAX_DURATION_SECONDS))]
    pub duration_seconds: u32,

    pub aspect_ratio: AspectRatio,

    /// Trimmed, non-empty, deduplicated (case-insensitive), in input order
    pub brand_keywords: Vec<String>,

    #[validate(length(min = 1))]
    pub call_to_action: String,

    pub include_captions: bool,
}

/// Wire shape of an incoming brief, before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBrief {
    prompt: String,
    target_audience: String,
    goal: String,
    tone: Tone,
    platform: Platform,
    /// Kept as a raw number so any integer, however large, maps to a range error
    duration_seconds: serde_json::Number,
    aspect_ratio: AspectRatio,
    #[serde(default)]
    brand_keywords: Vec<String>,
    call_to_action: String,
    #[serde(default = "default_include_captions")]
    include_captions: bool,
}

fn default_include_captions() -> bool {
    true
}

impl Brief {
    /// Validate and normalize a raw JSON payload into a canonical brief.
    pub fn from_value(input: serde_json::Value) -> Result<Self, BriefError> {
        let raw: RawBrief = serde_json::from_value(input)
            .map_err(|e| BriefError::InvalidInput(e.to_string()))?;
        raw.into_brief()
    }

    /// The brief the editor opens with.
    pub fn sample() -> Self {
        Self {
            prompt: "Launch our AI-native video agent that builds kinetic marketing spots"
                .to_string(),
            target_audience: "Growth teams at product-led SaaS startups".to_string(),
            goal: "Drive waitlist sign-ups".to_string(),
            tone: Tone::Bold,
            platform: Platform::TikTok,
            duration_seconds: 45,
            aspect_ratio: AspectRatio::Portrait,
            brand_keywords: vec![
                "AI-native".to_string(),
                "Kinetic".to_string(),
                "Conversion-first".to_string(),
            ],
            call_to_action: "Join the waitlist".to_string(),
            include_captions: true,
        }
    }

    /// Brand keyword for the given slot, cycling through the list.
    ///
    /// Falls back to the platform name when no keywords were supplied.
    pub fn keyword_at(&self, index: usize) -> &str {
        if self.brand_keywords.is_empty() {
            self.platform.as_str()
        } else {
            &self.brand_keywords[index % self.brand_keywords.len()]
        }
    }
}

impl RawBrief {
    fn into_brief(self) -> Result<Brief, BriefError> {
        let duration_seconds = whole_seconds(&self.duration_seconds)?;

        let brief = Brief {
            prompt: self.prompt.trim().to_string(),
            target_audience: self.target_audience.trim().to_string(),
            goal: self.goal.trim().to_string(),
            tone: self.tone,
            platform: self.platform,
            duration_seconds,
            aspect_ratio: self.aspect_ratio,
            brand_keywords: normalize_keywords(self.brand_keywords),
            call_to_action: self.call_to_action.trim().to_string(),
            include_captions: self.include_captions,
        };

        brief
            .validate()
            .map_err(|errors| BriefError::from_validation(&errors, duration_seconds))?;

        Ok(brief)
    }
}

/// Integral seconds; non-integers are invalid, integers outside `u32` are out of range.
fn whole_seconds(number: &serde_json::Number) -> Result<u32, BriefError> {
    if let Some(value) = number.as_u64() {
        u32::try_from(value).map_err(|_| BriefError::out_of_range(value))
    } else if let Some(value) = number.as_i64() {
        Err(BriefError::out_of_range(value))
    } else {
        Err(BriefError::InvalidInput(format!(
            "durationSeconds must be a whole number, got {}",
            number
        )))
    }
}

fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
