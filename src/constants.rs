// ABOUTME: System-wide constants and defaults for the FitCoach API
// ABOUTME: Groups service names, HTTP defaults, auth lifetimes and generation parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults. Anything operators may want to change is read through
//! `config::environment` and only falls back to these values.

/// Service identity
pub mod service_names {
    /// Service name used in logs
    pub const FITCOACH_SERVER: &str = "fitcoach-server";

    /// JWT audience for tokens issued by this service
    pub const TOKEN_AUDIENCE: &str = "fitcoach";
}

/// HTTP surface defaults
pub mod http {
    /// Default listening port
    pub const DEFAULT_HTTP_PORT: u16 = 3004;

    /// Default base path every API route is nested under
    pub const DEFAULT_BASE_PATH: &str = "/FitCoach";

    /// Public path prefix for uploaded photos
    pub const UPLOADS_ROUTE: &str = "/uploads";

    /// Request id header
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Resource limits
pub mod limits {
    /// Maximum number of sessions returned by the history endpoint
    pub const WORKOUT_HISTORY_LIMIT: i64 = 20;

    /// Default token lifetime: 30 days
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 30 * 24;

    /// Longest accepted token lifetime: one year
    pub const MAX_JWT_EXPIRY_HOURS: i64 = 365 * 24;

    /// Default maximum request body size for photo uploads (10 MiB)
    pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

    /// Length of the generated development JWT secret
    pub const GENERATED_JWT_SECRET_BYTES: usize = 64;

    /// bcrypt work factor for stored passwords
    pub const BCRYPT_COST: u32 = 10;
}

/// Plan generation defaults
pub mod generation {
    /// Sampling temperature sent to the LLM
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Completion token ceiling
    pub const DEFAULT_MAX_TOKENS: u32 = 2000;

    /// Default chat-completions endpoint base
    pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

    /// Default model
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

    /// Default whole-request timeout for the LLM call
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Connect timeout for the LLM call
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Storage defaults
pub mod defaults {
    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fitcoach.db";

    /// Default upload directory
    pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
}
