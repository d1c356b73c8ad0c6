//! Shared data models for MotionDirector.
//!
//! This crate provides Serde-serializable types for:
//! - Creative briefs and their validation
//! - Scenes and production plans
//! - The structural plan contract applied to every plan before use

pub mod brief;
pub mod plan;
pub mod scene;
pub mod schema;

// Re-export common types
pub use brief::{
    AspectRatio, Brief, BriefError, Platform, Tone, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS,
};
pub use plan::{AiAssets, Plan, PlanMetadata, Soundtrack};
pub use scene::{scene_id, Scene};
pub use schema::{check_plan, parse_plan, parse_plan_value, plan_json_schema, SchemaError};
