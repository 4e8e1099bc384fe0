// ABOUTME: Centralized resource container for dependency injection into HTTP handlers
// ABOUTME: Builds the database, auth manager, plan generator and photo store once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Handlers receive `Arc<ServerResources>` as axum state. Nothing in the
//! request path is a global.

use crate::auth::{generate_jwt_secret, AuthManager};
use crate::coaching::{GenerationSettings, PlanGenerator};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::llm::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::uploads::PhotoStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared, read-only collaborators of every request
#[derive(Clone)]
pub struct ServerResources {
    /// Users and workout sessions
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Plan generation with its fallback
    pub plan_generator: Arc<PlanGenerator>,
    /// Uploaded progress photos
    pub photo_store: Arc<PhotoStore>,
    /// Validated server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        plan_generator: PlanGenerator,
        photo_store: PhotoStore,
        config: ServerConfig,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            plan_generator: Arc::new(plan_generator),
            photo_store: Arc::new(photo_store),
            config: Arc::new(config),
        }
    }

    /// Build every resource from configuration
    pub async fn from_config(config: ServerConfig) -> Result<Self> {
        let database = Database::new(&config.database.url)
            .await
            .context("Failed to open database")?;

        let auth_manager = build_auth_manager(&config)?;
        let plan_generator = build_plan_generator(&config)?;

        let photo_store = PhotoStore::new(config.uploads.directory.clone())
            .await
            .context("Failed to prepare upload directory")?;

        Ok(Self::new(
            database,
            auth_manager,
            plan_generator,
            photo_store,
            config,
        ))
    }
}

fn build_auth_manager(config: &ServerConfig) -> Result<AuthManager> {
    let expiry = config.auth.jwt_expiry_hours;
    if let Some(secret) = &config.auth.jwt_secret {
        return Ok(AuthManager::new(secret.as_bytes(), expiry));
    }

    warn!("JWT_SECRET not set; using a random secret, issued tokens will not survive a restart");
    let secret = generate_jwt_secret()?;
    Ok(AuthManager::new(&secret, expiry))
}

fn build_plan_generator(config: &ServerConfig) -> Result<PlanGenerator> {
    let settings = GenerationSettings::from(&config.llm);
    let provider = match OpenAiCompatibleConfig::from_llm_config(&config.llm) {
        Some(provider_config) => {
            info!(
                "Plan generation via {} (model {})",
                provider_config.base_url, provider_config.default_model
            );
            let provider = OpenAiCompatibleProvider::new(provider_config)
                .context("Failed to build LLM client")?;
            Some(Arc::new(provider) as Arc<dyn LlmProvider>)
        }
        None => {
            warn!("No LLM provider configured; the default workout plan will be served");
            None
        }
    };

    Ok(PlanGenerator::new(provider, settings))
}
