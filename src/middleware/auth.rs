// ABOUTME: Bearer token extractor guarding the authenticated API routes
// ABOUTME: Missing tokens are rejected with 401 and invalid or expired tokens with 403
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use fitcoach_core::errors::{AppError, AppResult};
use std::sync::Arc;
use uuid::Uuid;

/// Identity proven by a valid bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Token subject
    pub user_id: Uuid,
    /// Email at the time the token was issued
    pub email: String,
}

/// Pull the token out of an `Authorization: <scheme> <token>` header
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<ServerResources>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let resources = Arc::<ServerResources>::from_ref(state);

        let token = bearer_token(parts).ok_or_else(AppError::auth_required)?;
        let claims = resources.auth_manager.validate_token_detailed(token)?;
        let user_id = claims.user_id()?;

        tracing::debug!(user.id = %user_id, "Request authenticated");
        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}
