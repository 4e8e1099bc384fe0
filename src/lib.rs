// ABOUTME: Main library entry point for the FitCoach API server
// ABOUTME: Exposes authentication, profiles, workout plan generation and session history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitCoach Server
//!
//! Backend of the FitCoach mobile app. It authenticates users, stores their
//! profiles and workout sessions, and asks an LLM for a structured workout
//! plan. When generation fails for any reason the user still receives a
//! fixed default plan.
//!
//! ## Architecture
//!
//! - **Routes**: axum handlers, one `XRoutes` per domain
//! - **Coaching**: prompt building, completion parsing and the fallback
//! - **LLM**: provider trait and an OpenAI-compatible client
//! - **Database**: `SQLite` persistence through `sqlx`
//! - **Resources**: collaborators built once and injected as axum state
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitcoach_server::config::ServerConfig;
//! use fitcoach_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config).await?);
//!     fitcoach_server::server::run(resources).await
//! }
//! ```

/// JWT issuance and validation, password hashing
pub mod auth;

/// Workout plan generation with fallback
pub mod coaching;

/// Environment-based configuration
pub mod config;

/// System-wide constants and defaults
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// LLM provider abstraction and clients
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware and extractors
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// HTTP server lifecycle
pub mod server;

/// Photo storage on disk
pub mod uploads;

pub use fitcoach_core::errors;
pub use fitcoach_core::models;
