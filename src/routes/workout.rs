// ABOUTME: Workout route handlers for plan generation and session history
// ABOUTME: Accepts multipart or JSON submissions and always answers with a usable plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout routes
//!
//! `POST /workout` validates the body attributes, stores the optional photo,
//! asks the plan generator for a plan (falling back to the default plan on
//! any generation failure) and persists the result as a new session.
//! `GET /workout/history` and `GET /workout/:id` read sessions back, scoped to
//! the authenticated user.

use super::forms::{non_blank, parse_measurement, present, FormValue, JsonBody};
use crate::coaching::PlanRequest;
use crate::logging::AppLogger;
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;
use axum::async_trait;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use fitcoach_core::errors::{AppError, AppResult, ErrorCode};
use fitcoach_core::models::{BodyProfile, Plan, WorkoutSession};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// JSON variant of the generation request
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutJsonRequest {
    /// Self-reported body type
    pub morphology: Option<String>,
    /// Height in centimetres
    pub height: Option<FormValue>,
    /// Weight in kilograms
    pub weight: Option<FormValue>,
}

/// Photo received in the `photo` multipart field
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    /// Client-side file name
    pub file_name: Option<String>,
    /// File content
    pub bytes: Vec<u8>,
}

/// Raw generation request, before validation
#[derive(Debug, Default)]
pub struct WorkoutSubmission {
    /// Self-reported body type
    pub morphology: Option<String>,
    /// Height as sent
    pub height: Option<FormValue>,
    /// Weight as sent
    pub weight: Option<FormValue>,
    /// Optional photo
    pub photo: Option<UploadedPhoto>,
}

impl WorkoutSubmission {
    /// Check required fields and parse the measurements
    pub fn body_profile(&self) -> AppResult<BodyProfile> {
        let missing = || AppError::missing_fields("Morphologie, taille et poids sont requis");

        let morphology = non_blank(self.morphology.as_deref()).ok_or_else(missing)?;
        let height = present(self.height.clone()).ok_or_else(missing)?;
        let weight = present(self.weight.clone()).ok_or_else(missing)?;

        Ok(BodyProfile {
            morphology: morphology.to_owned(),
            height: parse_measurement("La taille", &height)?,
            weight: parse_measurement("Le poids", &weight)?,
        })
    }

    async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "photo" => {
                    let file_name = field.file_name().map(ToOwned::to_owned);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if !bytes.is_empty() {
                        submission.photo = Some(UploadedPhoto {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                "morphology" => {
                    submission.morphology = Some(field.text().await.map_err(multipart_error)?);
                }
                "height" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    submission.height = Some(FormValue::Text(text));
                }
                "weight" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    submission.weight = Some(FormValue::Text(text));
                }
                other => {
                    tracing::debug!(field = %other, "Ignoring unknown multipart field");
                }
            }
        }

        Ok(submission)
    }
}

fn multipart_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::invalid_input("Fichier trop volumineux");
    }
    AppError::new(
        ErrorCode::InvalidFormat,
        format!("Invalid multipart body: {}", error.body_text()),
    )
}

#[async_trait]
impl<S> FromRequest<S> for WorkoutSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| {
                    AppError::new(ErrorCode::InvalidFormat, rejection.body_text())
                })?;
            return Self::from_multipart(multipart).await;
        }

        let JsonBody(request) = JsonBody::<WorkoutJsonRequest>::from_request(req, state).await?;
        Ok(Self {
            morphology: request.morphology,
            height: request.height,
            weight: request.weight,
            photo: None,
        })
    }
}

/// Session summary returned right after generation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSession {
    /// Session id
    pub id: Uuid,
    /// Plan served to the user
    pub workout_plan: Plan,
    /// Public photo path, if a photo was uploaded
    pub photo_url: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// `POST /workout` response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateWorkoutResponse {
    /// Always `true`
    pub success: bool,
    /// Newly stored session
    pub session: GeneratedSession,
}

/// `GET /workout/history` response
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutHistoryResponse {
    /// Always `true`
    pub success: bool,
    /// Most recent sessions first
    pub sessions: Vec<WorkoutSession>,
}

/// `GET /workout/:id` response
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutSessionResponse {
    /// Always `true`
    pub success: bool,
    /// Requested session
    pub session: WorkoutSession,
}

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create the workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workout", post(Self::handle_generate))
            .route("/workout/history", get(Self::handle_history))
            .route("/workout/:id", get(Self::handle_get_session))
            .with_state(resources)
    }

    /// Generate, persist and return a workout plan
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        submission: WorkoutSubmission,
    ) -> Result<Response, AppError> {
        let profile = submission.body_profile()?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ResourceNotFound, "Utilisateur introuvable"))?;

        let photo_url = match &submission.photo {
            Some(photo) => Some(
                resources
                    .photo_store
                    .save(photo.file_name.as_deref(), &photo.bytes)
                    .await?,
            ),
            None => None,
        };

        let started = Instant::now();
        let outcome = resources
            .plan_generator
            .generate(&PlanRequest::new(&user, &profile))
            .await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_plan_generation(&user.id.to_string(), outcome.source(), elapsed_ms);

        let session = WorkoutSession::new(user.id, profile, photo_url, outcome.into_plan());
        if let Err(e) = resources.database.create_workout_session(&session).await {
            if let Some(photo_url) = &session.photo_url {
                if let Err(cleanup) = resources.photo_store.remove(photo_url).await {
                    tracing::warn!(error = %cleanup, "Failed to remove orphaned photo {photo_url}");
                }
            }
            return Err(e);
        }

        let response = GenerateWorkoutResponse {
            success: true,
            session: GeneratedSession {
                id: session.id,
                workout_plan: session.workout_plan,
                photo_url: session.photo_url,
                created_at: session.created_at,
            },
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Most recent sessions of the authenticated user
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let sessions = resources
            .database
            .list_workout_sessions(auth.user_id)
            .await?;

        let response = WorkoutHistoryResponse {
            success: true,
            sessions,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// One session, only if it belongs to the authenticated user
    async fn handle_get_session(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(session_id): Path<String>,
    ) -> Result<Response, AppError> {
        let not_found = || AppError::new(ErrorCode::ResourceNotFound, "Séance introuvable");

        let session_id = Uuid::parse_str(&session_id).map_err(|_| not_found())?;
        let session = resources
            .database
            .get_workout_session_for_user(session_id, auth.user_id)
            .await?
            .ok_or_else(not_found)?;

        let response = WorkoutSessionResponse {
            success: true,
            session,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
