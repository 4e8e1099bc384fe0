// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory resources, scripted LLM providers and registered users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitcoach_server`

use async_trait::async_trait;
use axum::Router;
use fitcoach_server::{
    config::ServerConfig,
    errors::{AppError, ErrorCode},
    llm::{ChatRequest, ChatResponse, LlmProvider},
    resources::ServerResources,
    routes::build_router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub const TEST_JWT_SECRET: &str = "fitcoach-integration-test-secret-0123456789";

/// Configuration for an in-memory database and a temporary upload directory
pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", "sqlite::memory:".to_owned()),
        ("JWT_SECRET", TEST_JWT_SECRET.to_owned()),
        ("ENVIRONMENT", "testing".to_owned()),
        ("UPLOAD_DIR", upload_dir.path().display().to_string()),
    ]);
    ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

/// What a [`ScriptedProvider`] answers
#[derive(Debug, Clone)]
pub enum Script {
    /// Return this completion text
    Reply(String),
    /// Fail with this error code
    Fail(ErrorCode),
}

/// LLM provider returning a fixed answer and counting calls
pub struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn reply(content: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply(content.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(code: ErrorCode) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Fail(code),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Script::Fail(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// A complete, valid plan as the LLM would return it
pub fn sample_plan_json() -> Value {
    json!({
        "sessionName": "Full Body Express",
        "duration": "45 minutes",
        "warmup": [
            {"exercise": "Rameur", "duration": "5 min", "description": "Allure modérée"}
        ],
        "mainWorkout": [
            {"exercise": "Fentes", "sets": 4, "reps": "12", "rest": "60s", "description": "Alterner les jambes"},
            {"exercise": "Tractions", "sets": "3", "reps": 8, "rest": "90s", "description": "Amplitude complète"}
        ],
        "cooldown": [
            {"exercise": "Étirement ischio-jambiers", "duration": "3 min", "description": "Respirer lentement"}
        ],
        "tips": ["Hydratez-vous"],
        "caloriesBurned": 380
    })
}

/// Router and resources backed by an in-memory database
pub struct TestApp {
    pub resources: Arc<ServerResources>,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// App without an LLM provider: every generation falls back
    pub async fn new() -> Self {
        Self::with_provider(None).await
    }

    /// App using the given provider for plan generation
    pub async fn with_provider(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        init_test_logging();
        let upload_dir = TempDir::new().expect("temp upload dir");
        let config = test_config(&upload_dir);

        let mut resources = ServerResources::from_config(config)
            .await
            .expect("test resources");
        let settings = fitcoach_server::coaching::GenerationSettings::from(&resources.config.llm);
        resources.plan_generator = Arc::new(fitcoach_server::coaching::PlanGenerator::new(
            provider, settings,
        ));

        Self {
            resources: Arc::new(resources),
            upload_dir,
        }
    }

    /// Full application router
    pub fn router(&self) -> Router {
        build_router(&self.resources)
    }

    /// Base path the API is nested under
    pub fn path(&self, route: &str) -> String {
        format!("{}{route}", self.resources.config.base_path)
    }
}

/// Registration body with sensible defaults
pub fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "password": "motdepasse123",
        "name": "Camille",
        "gender": "female",
        "age": 29
    })
}
