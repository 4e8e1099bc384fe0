// ABOUTME: Core data models for the FitCoach API
// ABOUTME: Re-exports the plan, user and workout session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Wire shapes use camelCase because the mobile client reads them as-is.

mod plan;
mod session;
mod user;

pub use plan::{Plan, StrengthExercise, TimedExercise};
pub use session::{BodyProfile, WorkoutSession};
pub use user::{Gender, ProfileUpdate, PublicUser, User};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the microsecond precision timestamps are stored with
#[must_use]
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
