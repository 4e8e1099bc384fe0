// ABOUTME: Total workout plan generator backed by an optional LLM provider
// ABOUTME: Returns either the generated plan or the default plan with the reason it was used

use super::default_plan::default_plan;
use super::parser::parse_plan;
use super::prompt::{build_chat_request, PlanRequest};
use crate::config::LlmConfig;
use crate::constants::generation;
use crate::llm::LlmProvider;
use fitcoach_core::errors::{AppError, ErrorCode};
use fitcoach_core::models::Plan;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Why the default plan was served instead of a generated one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCause {
    /// No provider is configured (missing API key)
    ProviderUnavailable,
    /// The provider did not answer in time
    Timeout,
    /// The provider could not be reached
    Network,
    /// The provider answered with an error
    Upstream,
    /// The completion had no text
    EmptyCompletion,
    /// The completion was not a plan
    MalformedOutput,
    /// The plan is missing a warm-up, main or cool-down phase
    IncompletePlan,
}

impl FallbackCause {
    /// Stable label used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable => "provider_unavailable",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::Upstream => "upstream",
            Self::EmptyCompletion => "empty_completion",
            Self::MalformedOutput => "malformed_output",
            Self::IncompletePlan => "incomplete_plan",
        }
    }

    /// Classify a provider error
    #[must_use]
    pub const fn from_provider_error(error: &AppError) -> Self {
        match error.code {
            ErrorCode::ExternalTimeout => Self::Timeout,
            ErrorCode::ExternalServiceUnavailable => Self::Network,
            _ => Self::Upstream,
        }
    }
}

impl fmt::Display for FallbackCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The provider produced a usable plan
    Generated(Plan),
    /// The default plan was used
    Fallback {
        /// Always the default plan
        plan: Plan,
        /// Why generation was abandoned
        cause: FallbackCause,
    },
}

impl PlanOutcome {
    fn fallback(cause: FallbackCause) -> Self {
        Self::Fallback {
            plan: default_plan(),
            cause,
        }
    }

    /// Borrow the plan regardless of origin
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        match self {
            Self::Generated(plan) | Self::Fallback { plan, .. } => plan,
        }
    }

    /// Take the plan regardless of origin
    #[must_use]
    pub fn into_plan(self) -> Plan {
        match self {
            Self::Generated(plan) | Self::Fallback { plan, .. } => plan,
        }
    }

    /// The fallback cause, if the default plan was used
    #[must_use]
    pub const fn fallback_cause(&self) -> Option<FallbackCause> {
        match self {
            Self::Generated(_) => None,
            Self::Fallback { cause, .. } => Some(*cause),
        }
    }

    /// Label for logs: `generated` or the fallback cause
    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::Generated(_) => "generated",
            Self::Fallback { cause, .. } => cause.as_str(),
        }
    }
}

/// Provider state shown by the readiness endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    /// No API key, every generation falls back
    NotConfigured,
    /// The provider accepted the health check
    Reachable,
    /// The provider answered but rejected the check
    Unhealthy,
    /// The provider could not be reached
    Unreachable,
}

impl ProviderStatus {
    /// Label used in the readiness payload
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Reachable => "ok",
            Self::Unhealthy => "unhealthy",
            Self::Unreachable => "unreachable",
        }
    }
}

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: generation::DEFAULT_OPENAI_MODEL.to_owned(),
            temperature: generation::DEFAULT_TEMPERATURE,
            max_tokens: generation::DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Produces a plan for every request, falling back when the provider fails
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    settings: GenerationSettings,
}

impl PlanGenerator {
    /// Create a generator; `None` means every request falls back
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Probe the provider for the readiness report; never fails
    pub async fn provider_status(&self) -> ProviderStatus {
        let Some(provider) = &self.provider else {
            return ProviderStatus::NotConfigured;
        };

        match provider.health_check().await {
            Ok(true) => ProviderStatus::Reachable,
            Ok(false) => ProviderStatus::Unhealthy,
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error.code = %e.code,
                    "LLM health check failed: {}",
                    e.message
                );
                ProviderStatus::Unreachable
            }
        }
    }

    /// Generate a plan; never fails
    pub async fn generate(&self, request: &PlanRequest) -> PlanOutcome {
        let started = Instant::now();
        let outcome = self.try_generate(request).await;

        match &outcome {
            PlanOutcome::Generated(plan) => info!(
                plan.session = %plan.session_name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Workout plan generated"
            ),
            PlanOutcome::Fallback { cause, .. } => warn!(
                fallback.cause = %cause,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Serving default workout plan"
            ),
        }
        outcome
    }

    async fn try_generate(&self, request: &PlanRequest) -> PlanOutcome {
        let Some(provider) = &self.provider else {
            return PlanOutcome::fallback(FallbackCause::ProviderUnavailable);
        };

        let chat = build_chat_request(request, &self.settings);
        let response = match provider.complete(&chat).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error.code = %e.code,
                    "Plan generation request failed: {}",
                    e.message
                );
                return PlanOutcome::fallback(FallbackCause::from_provider_error(&e));
            }
        };

        if let Some(usage) = &response.usage {
            debug!(
                provider = provider.name(),
                model = %response.model,
                tokens.prompt = usage.prompt_tokens,
                tokens.completion = usage.completion_tokens,
                tokens.total = usage.total_tokens,
                "Completion token usage"
            );
        }
        if response.finish_reason.as_deref() == Some("length") {
            warn!(
                max_tokens = self.settings.max_tokens,
                "Completion stopped at the token limit"
            );
        }

        match parse_plan(&response.content) {
            Ok(plan) => PlanOutcome::Generated(plan),
            Err(cause) => PlanOutcome::fallback(cause),
        }
    }
}
