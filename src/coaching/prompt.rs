// ABOUTME: Builds the workout request prompt from the user's profile and body attributes
// ABOUTME: Produces the chat request with the configured model and sampling settings

use super::generator::GenerationSettings;
use crate::llm::prompts::{coach_system_prompt, WORKOUT_PLAN_TEMPLATE};
use crate::llm::{ChatMessage, ChatRequest};
use fitcoach_core::models::{BodyProfile, Gender, User};

/// Everything the prompt needs about the person training
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// From the stored account
    pub gender: Gender,
    /// From the stored account
    pub age: u32,
    /// From the request
    pub morphology: String,
    /// Centimetres, from the request
    pub height: f64,
    /// Kilograms, from the request
    pub weight: f64,
}

impl PlanRequest {
    /// Combine the stored account with the submitted body attributes
    #[must_use]
    pub fn new(user: &User, profile: &BodyProfile) -> Self {
        Self {
            gender: user.gender,
            age: user.age,
            morphology: profile.morphology.clone(),
            height: profile.height,
            weight: profile.weight,
        }
    }
}

const fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Homme",
        Gender::Female => "Femme",
    }
}

/// Render the user prompt for a plan request
#[must_use]
pub fn build_workout_prompt(request: &PlanRequest) -> String {
    WORKOUT_PLAN_TEMPLATE
        .replace("{gender}", gender_label(request.gender))
        .replace("{age}", &request.age.to_string())
        .replace("{height}", &request.height.to_string())
        .replace("{weight}", &request.weight.to_string())
        // Client text last: placeholders inside it stay literal
        .replace("{morphology}", &request.morphology)
}

/// Build the full chat request (system message plus user prompt)
#[must_use]
pub fn build_chat_request(request: &PlanRequest, settings: &GenerationSettings) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(coach_system_prompt()),
        ChatMessage::user(build_workout_prompt(request)),
    ])
    .with_model(settings.model.clone())
    .with_temperature(settings.temperature)
    .with_max_tokens(settings.max_tokens)
}
