// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the FitCoach server
//!
//! All configuration comes from environment variables (optionally seeded from
//! a `.env` file). See [`environment::ServerConfig::from_lookup`] for the full
//! variable list.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, LlmConfig, ServerConfig};
