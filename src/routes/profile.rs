// ABOUTME: Profile route handlers for reading and updating the authenticated user
// ABOUTME: Updates only touch the fields the client actually sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::forms::{non_blank, parse_age, parse_gender, present, FormValue, JsonBody};
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitcoach_core::errors::{AppError, AppResult, ErrorCode};
use fitcoach_core::models::{ProfileUpdate, PublicUser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Profile update body; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name
    pub name: Option<String>,
    /// New age as a number or numeric string
    pub age: Option<FormValue>,
    /// New gender label
    pub gender: Option<String>,
}

impl UpdateProfileRequest {
    /// Validate present fields; blank ones are ignored
    pub fn into_update(self) -> AppResult<ProfileUpdate> {
        Ok(ProfileUpdate {
            name: non_blank(self.name.as_deref()).map(ToOwned::to_owned),
            gender: non_blank(self.gender.as_deref())
                .map(parse_gender)
                .transpose()?,
            age: present(self.age).as_ref().map(parse_age).transpose()?,
        })
    }
}

/// Profile response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Always `true`
    pub success: bool,
    /// Current profile
    pub user: PublicUser,
}

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create the profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(user_not_found)?;

        let response = ProfileResponse {
            success: true,
            user: PublicUser::from(&user),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        JsonBody(request): JsonBody<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let update = request.into_update()?;

        let user = resources
            .database
            .update_user_profile(auth.user_id, &update)
            .await?
            .ok_or_else(user_not_found)?;

        if !update.is_empty() {
            info!(user.id = %user.id, "Profile updated");
        }

        let response = ProfileResponse {
            success: true,
            user: PublicUser::from(&user),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

fn user_not_found() -> AppError {
    AppError::new(ErrorCode::ResourceNotFound, "Utilisateur introuvable")
}
