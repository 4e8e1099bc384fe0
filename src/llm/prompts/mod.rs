// ABOUTME: Prompt texts for workout plan generation loaded at compile time
// ABOUTME: Provides the coach system prompt and the per-user workout request template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts live in markdown files next to this module so they can be edited
//! without touching code.

/// System message sent with every generation request
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Workout request template
///
/// Placeholders: `{gender}`, `{age}`, `{morphology}`, `{height}`, `{weight}`.
pub const WORKOUT_PLAN_TEMPLATE: &str = include_str!("workout_plan.md");

/// Get the coach system prompt
#[must_use]
pub fn coach_system_prompt() -> &'static str {
    COACH_SYSTEM_PROMPT.trim_end()
}
