// ABOUTME: Workout session record pairing a user, their body attributes and a plan
// ABOUTME: Sessions are written once at generation time and never updated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Plan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body attributes submitted with a generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Self-reported body type (free text, e.g. "ectomorph")
    pub morphology: String,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
}

/// Persisted generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Unique identifier
    pub id: Uuid,
    /// Owner of the session
    pub user_id: Uuid,
    /// Morphology submitted with the request
    pub morphology: String,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Public path of the uploaded photo, if any
    pub photo_url: Option<String>,
    /// Plan produced for this request
    pub workout_plan: Plan,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// Build a new session for `user_id` stamped with the current time
    #[must_use]
    pub fn new(user_id: Uuid, profile: BodyProfile, photo_url: Option<String>, plan: Plan) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            morphology: profile.morphology,
            height: profile.height,
            weight: profile.weight,
            photo_url,
            workout_plan: plan,
            created_at: super::timestamp_now(),
        }
    }
}
