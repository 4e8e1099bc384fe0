// ABOUTME: Account registration and login route handlers
// ABOUTME: Issues bearer tokens for new and returning users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! `POST /register` creates an account and returns a token, `POST /login`
//! exchanges credentials for a token. Both answer with the public user.

use super::forms::{non_blank, parse_age, parse_gender, present, FormValue, JsonBody};
use crate::auth::{hash_password, verify_password};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use fitcoach_core::errors::{AppError, AppResult};
use fitcoach_core::models::{PublicUser, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Registration body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// `male` or `female`
    pub gender: Option<String>,
    /// Age as a number or numeric string
    pub age: Option<FormValue>,
}

/// Login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// Token plus public user, returned by both endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Always `true`
    pub success: bool,
    /// Bearer token
    pub token: String,
    /// Account without the password hash
    pub user: PublicUser,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/register", post(Self::handle_register))
            .route("/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle account registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let missing = || AppError::missing_fields("Tous les champs sont requis");

        let email = non_blank(request.email.as_deref()).ok_or_else(missing)?;
        let password = request
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .ok_or_else(missing)?;
        let name = non_blank(request.name.as_deref()).ok_or_else(missing)?;
        let gender = non_blank(request.gender.as_deref()).ok_or_else(missing)?;
        let age = present(request.age).ok_or_else(missing)?;

        let gender = parse_gender(gender)?;
        let age = parse_age(&age)?;
        let email = User::normalize_email(email);

        if resources.database.get_user_by_email(&email).await?.is_some() {
            AppLogger::log_auth_event(&email, "register", false, Some("email already registered"));
            return Err(AppError::already_exists("Cet email est déjà utilisé"));
        }

        let password_hash = hash_password(password).await?;
        let user = User::new(email, password_hash, name.to_owned(), gender, age);
        resources.database.create_user(&user).await?;

        let token = issue_token(&resources, &user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);
        info!(user.id = %user.id, "User registered");

        let response = AuthResponse {
            success: true,
            token,
            user: PublicUser::from(&user),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle login with email and password
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Response, AppError> {
        let missing = || AppError::missing_fields("Email et mot de passe requis");

        let email = non_blank(request.email.as_deref()).ok_or_else(missing)?;
        let password = request
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .ok_or_else(missing)?;
        let email = User::normalize_email(email);

        let user = resources.database.get_user_by_email(&email).await?;
        let verified = match &user {
            Some(user) => verify_password(password, &user.password_hash).await?,
            None => false,
        };
        let Some(user) = user.filter(|_| verified) else {
            AppLogger::log_auth_event(&email, "login", false, Some("bad credentials"));
            return Err(AppError::auth_invalid("Email ou mot de passe incorrect"));
        };

        let token = issue_token(&resources, &user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        let response = AuthResponse {
            success: true,
            token,
            user: PublicUser::from(&user),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

fn issue_token(resources: &ServerResources, user: &User) -> AppResult<String> {
    resources
        .auth_manager
        .generate_token(user)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))
}
