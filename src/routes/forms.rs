// ABOUTME: Request body extraction and field validation shared by the route handlers
// ABOUTME: Accepts loosely typed client values and reports failures in the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The mobile client posts text-input values, so numeric fields may arrive
//! either as JSON numbers or as strings. Empty strings count as missing.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use fitcoach_core::errors::{AppError, AppResult, ErrorCode};
use fitcoach_core::models::Gender;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// JSON body whose rejections use the API error envelope
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_error(&rejection)),
        }
    }
}

fn json_rejection_error(rejection: &JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a JSON body (Content-Type: application/json)".to_owned()
        }
        other => format!("Invalid JSON body: {}", other.body_text()),
    };
    AppError::new(ErrorCode::InvalidFormat, message)
}

/// Scalar value sent either as a JSON number or as text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// JSON number
    Number(f64),
    /// JSON string or multipart text field
    Text(String),
}

impl FormValue {
    /// Whether the value should be treated as absent
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

/// Drop blank values so that `""` behaves like an omitted field
#[must_use]
pub fn present(value: Option<FormValue>) -> Option<FormValue> {
    value.filter(|value| !value.is_blank())
}

/// Trimmed, non-empty text or `None`
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parse an age: a positive whole number of years
pub fn parse_age(value: &FormValue) -> AppResult<u32> {
    let invalid = || AppError::invalid_input("L'âge doit être un entier positif");

    let number = value.as_number().ok_or_else(invalid)?;
    if !number.is_finite() || number.fract() != 0.0 || number < 1.0 || number > f64::from(u32::MAX)
    {
        return Err(invalid());
    }
    Ok(number as u32)
}

/// Parse a body measurement: a finite number greater than zero
pub fn parse_measurement(field: &str, value: &FormValue) -> AppResult<f64> {
    value
        .as_number()
        .filter(|number| number.is_finite() && *number > 0.0)
        .ok_or_else(|| {
            AppError::invalid_input(format!("{field} doit être un nombre strictement positif"))
        })
}

/// Parse a gender label
pub fn parse_gender(value: &str) -> AppResult<Gender> {
    value.parse::<Gender>().map_err(AppError::invalid_input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_accepts_numbers_and_numeric_text() {
        assert_eq!(parse_age(&FormValue::Number(30.0)).unwrap(), 30);
        assert_eq!(parse_age(&FormValue::Text(" 42 ".into())).unwrap(), 42);
    }

    #[test]
    fn test_age_rejects_non_positive_and_fractional() {
        for value in [
            FormValue::Number(0.0),
            FormValue::Number(-3.0),
            FormValue::Number(25.5),
            FormValue::Text("vingt".into()),
        ] {
            let err = parse_age(&value).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }
    }

    #[test]
    fn test_measurement_must_be_positive_and_finite() {
        assert!((parse_measurement("height", &FormValue::Text("178.5".into())).unwrap() - 178.5).abs() < f64::EPSILON);
        assert!(parse_measurement("weight", &FormValue::Number(0.0)).is_err());
        assert!(parse_measurement("weight", &FormValue::Text("NaN".into())).is_err());
        assert!(parse_measurement("weight", &FormValue::Text("inf".into())).is_err());
        assert!(parse_measurement("weight", &FormValue::Text("lourd".into())).is_err());
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        assert_eq!(present(Some(FormValue::Text("  ".into()))), None);
        assert!(present(Some(FormValue::Number(0.0))).is_some());
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" Ana ")), Some("Ana"));
    }

    #[test]
    fn test_untagged_deserialization() {
        let number: FormValue = serde_json::from_str("72.5").unwrap();
        let text: FormValue = serde_json::from_str("\"72.5\"").unwrap();
        assert_eq!(number, FormValue::Number(72.5));
        assert_eq!(text, FormValue::Text("72.5".into()));
    }
}
