// ABOUTME: Structured workout plan produced for each generation request
// ABOUTME: Tolerates the scalar drift LLMs produce (numbers as strings and vice versa)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};

/// A complete workout session description
///
/// Serialized with the field names the mobile client renders
/// (`sessionName`, `mainWorkout`, `caloriesBurned`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Display name of the session
    #[serde(deserialize_with = "text_lenient")]
    pub session_name: String,
    /// Total duration, free text ("50 minutes")
    #[serde(deserialize_with = "text_lenient")]
    pub duration: String,
    /// Warm-up steps, in order
    #[serde(default)]
    pub warmup: Vec<TimedExercise>,
    /// Main exercises, in order
    #[serde(default)]
    pub main_workout: Vec<StrengthExercise>,
    /// Cool-down steps, in order
    #[serde(default)]
    pub cooldown: Vec<TimedExercise>,
    /// Coaching tips
    #[serde(default)]
    pub tips: Vec<String>,
    /// Estimated energy expenditure in kcal
    #[serde(deserialize_with = "count_lenient")]
    pub calories_burned: u32,
}

impl Plan {
    /// Whether every phase has at least one step
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.warmup.is_empty() && !self.main_workout.is_empty() && !self.cooldown.is_empty()
    }
}

/// A warm-up or cool-down step measured in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedExercise {
    /// Exercise name
    #[serde(deserialize_with = "text_lenient")]
    pub exercise: String,
    /// How long to perform it
    #[serde(default, deserialize_with = "text_lenient")]
    pub duration: String,
    /// Execution notes
    #[serde(default, deserialize_with = "text_lenient")]
    pub description: String,
}

/// A main-work step measured in sets and repetitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthExercise {
    /// Exercise name
    #[serde(deserialize_with = "text_lenient")]
    pub exercise: String,
    /// Number of sets
    #[serde(deserialize_with = "count_lenient")]
    pub sets: u32,
    /// Repetitions per set, or a hold time ("30s")
    #[serde(default, deserialize_with = "text_lenient")]
    pub reps: String,
    /// Rest between sets
    #[serde(default, deserialize_with = "text_lenient")]
    pub rest: String,
    /// Execution notes
    #[serde(default, deserialize_with = "text_lenient")]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn text_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Int(value)) => value.to_string(),
        Some(Scalar::Float(value)) => value.to_string(),
        Some(Scalar::Text(value)) => value,
    })
}

fn count_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = match Scalar::deserialize(deserializer)? {
        Scalar::Int(value) => value as f64,
        Scalar::Float(value) => value,
        Scalar::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got {text:?}")))?,
    };

    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!("count out of range: {value}")));
    }
    Ok(value.round() as u32)
}
