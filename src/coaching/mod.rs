// ABOUTME: Workout plan generation with a guaranteed fallback plan
// ABOUTME: Wires prompt building, completion parsing and the static default plan together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching
//!
//! [`PlanGenerator::generate`] never fails. Every problem between sending the
//! prompt and holding a usable [`fitcoach_core::models::Plan`] turns into
//! [`PlanOutcome::Fallback`] carrying the [`default_plan`] and a
//! [`FallbackCause`] for the logs.

/// The static plan served when generation fails
pub mod default_plan;
/// Plan generator and its outcome types
pub mod generator;
/// Completion text to plan parsing
pub mod parser;
/// Prompt construction from user and body attributes
pub mod prompt;

pub use default_plan::default_plan;
pub use generator::{
    FallbackCause, GenerationSettings, PlanGenerator, PlanOutcome, ProviderStatus,
};
pub use parser::{extract_json_payload, parse_plan};
pub use prompt::{build_chat_request, build_workout_prompt, PlanRequest};
