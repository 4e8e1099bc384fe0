// ABOUTME: Turns raw completion text into a validated workout plan
// ABOUTME: Strips a markdown code fence when present, then parses and checks the phases

use super::generator::FallbackCause;
use fitcoach_core::models::Plan;
use regex::Regex;
use std::sync::LazyLock;

/// First fenced block, any (or no) language tag
static FENCE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*\s*([\s\S]*?)\s*```").ok());

/// Return the inner text of the first code fence, or the trimmed input
#[must_use]
pub fn extract_json_payload(raw: &str) -> &str {
    FENCE_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(raw))
        .and_then(|captures| captures.get(1))
        .map_or_else(|| raw.trim(), |inner| inner.as_str().trim())
}

/// Parse completion text into a plan with all three phases populated
pub fn parse_plan(raw: &str) -> Result<Plan, FallbackCause> {
    if raw.trim().is_empty() {
        return Err(FallbackCause::EmptyCompletion);
    }

    let payload = extract_json_payload(raw);
    let plan: Plan = serde_json::from_str(payload).map_err(|e| {
        tracing::debug!("Completion is not a plan: {}", e);
        FallbackCause::MalformedOutput
    })?;

    if plan.is_complete() {
        Ok(plan)
    } else {
        Err(FallbackCause::IncompletePlan)
    }
}
