// ABOUTME: Route module organization for the FitCoach HTTP API
// ABOUTME: Assembles domain routers under the base path with tracing, CORS and body limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the FitCoach API
//!
//! Each domain module exposes a `XRoutes::routes(resources)` constructor.
//! [`build_router`] merges them, nests the result under the configured base
//! path and serves uploaded photos at `/uploads`.

/// Registration and login routes
pub mod auth;
/// Request body extraction and field validation
pub mod forms;
/// Health check and readiness routes
pub mod health;
/// Profile read and update routes
pub mod profile;
/// Workout generation and history routes
pub mod workout;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Profile route handlers
pub use profile::ProfileRoutes;
/// Workout route handlers
pub use workout::WorkoutRoutes;

use crate::constants::http::UPLOADS_ROUTE;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let config = &resources.config;

    let api = Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(ProfileRoutes::routes(Arc::clone(resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(resources)));

    let app = if config.base_path.is_empty() {
        api
    } else {
        Router::new().nest(&config.base_path, api)
    };

    let max_bytes = config.uploads.max_bytes;
    app.nest_service(
        UPLOADS_ROUTE,
        ServeDir::new(resources.photo_store.directory()),
    )
    .layer(DefaultBodyLimit::max(max_bytes))
    .layer(RequestBodyLimitLayer::new(max_bytes))
    .layer(setup_cors(&config.cors))
    .layer(TraceLayer::new_for_http())
    .layer(middleware::from_fn(request_id_middleware))
}
