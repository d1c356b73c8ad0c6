//! Plan synthesis for MotionDirector.
//!
//! This crate provides:
//! - Deterministic scene composition and plan assembly
//! - A time-bounded remote synthesis gateway (OpenAI Responses API)
//! - The orchestrator that always returns a valid plan for a valid brief

pub mod assembler;
pub mod composer;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod orchestrator;
pub mod phrasebook;

pub use assembler::{assemble_plan, minimal_plan, soundtrack_for};
pub use composer::{allocate_durations, beat_sequence, compose_scenes, Beat, MIN_SCENE_SECONDS};
pub use config::SynthConfig;
pub use error::{SynthError, SynthResult};
pub use gateway::{
    Credential, Deadline, GatewayState, OpenAiGateway, RemoteFailure, RemoteOutcome,
    RemoteSynthesis, DEFAULT_MODEL, REMOTE_DEADLINE,
};
pub use orchestrator::{deterministic, GenerateRequest, Generated, Orchestrator};
