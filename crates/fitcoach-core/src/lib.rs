// ABOUTME: Core types for the FitCoach workout-plan API
// ABOUTME: Foundation crate with error handling and the plan, user and session models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitCoach Core
//!
//! Shared types for the FitCoach server. This crate changes rarely and holds
//! no I/O, so the server crate recompiles without touching it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the HTTP error body
//! - **models**: `Plan`, `User`, `WorkoutSession` and their wire shapes

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models (plans, users, workout sessions)
pub mod models;
