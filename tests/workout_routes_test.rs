// ABOUTME: Integration tests for workout generation, session history and lookup
// ABOUTME: Exercises the fallback path, photo uploads and per-user isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{registration, sample_plan_json, ScriptedProvider, TestApp};
use fitcoach_server::coaching::default_plan;
use fitcoach_server::errors::ErrorCode;
use fitcoach_server::llm::LlmProvider;
use fitcoach_server::models::Plan;
use helpers::axum_test::{AxumTestRequest, MultipartForm};
use serde_json::{json, Value};
use std::sync::Arc;

async fn register(app: &TestApp, email: &str) -> String {
    let response = AxumTestRequest::post(&app.path("/register"))
        .json(&registration(email))
        .send(app.router())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    body["token"].as_str().unwrap().to_owned()
}

async fn generate(app: &TestApp, token: &str) -> Value {
    let response = AxumTestRequest::post(&app.path("/workout"))
        .bearer(token)
        .json(&json!({"morphology": "mésomorphe", "height": 170, "weight": "65.5"}))
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);
    response.json()
}

fn assert_well_formed(plan: &Value) {
    for phase in ["warmup", "mainWorkout", "cooldown"] {
        assert!(
            plan[phase].as_array().is_some_and(|items| !items.is_empty()),
            "{phase} must not be empty"
        );
    }
    assert!(plan["tips"].is_array());
    assert!(plan["caloriesBurned"].is_u64());
}

fn default_plan_json() -> Value {
    serde_json::to_value(default_plan()).unwrap()
}

#[tokio::test]
async fn test_generate_without_provider_serves_default_plan() {
    let app = TestApp::new().await;
    let token = register(&app, "fallback@example.com").await;

    let body = generate(&app, &token).await;

    assert_eq!(body["success"], true);
    let session = &body["session"];
    assert!(session["id"].is_string());
    assert!(session["createdAt"].is_string());
    assert!(session["photoUrl"].is_null());
    assert_eq!(session["workoutPlan"], default_plan_json());
    assert_well_formed(&session["workoutPlan"]);
}

#[tokio::test]
async fn test_generate_uses_fenced_completion() {
    let reply = format!("Voici votre séance :\n```json\n{}\n```", sample_plan_json());
    let provider = ScriptedProvider::reply(reply);
    let app = TestApp::with_provider(Some(provider.clone() as Arc<dyn LlmProvider>)).await;
    let token = register(&app, "fenced@example.com").await;

    let body = generate(&app, &token).await;

    let plan = &body["session"]["workoutPlan"];
    assert_eq!(plan["sessionName"], "Full Body Express");
    assert_eq!(plan["mainWorkout"][1]["sets"], 3);
    assert_eq!(plan["mainWorkout"][1]["reps"], "8");
    assert_eq!(plan["caloriesBurned"], 380);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_generate_falls_back_on_prose() {
    let provider = ScriptedProvider::reply("Désolé, je ne peux pas générer de plan aujourd'hui.");
    let app = TestApp::with_provider(Some(provider as Arc<dyn LlmProvider>)).await;
    let token = register(&app, "prose@example.com").await;

    let body = generate(&app, &token).await;

    assert_eq!(body["session"]["workoutPlan"], default_plan_json());
}

#[tokio::test]
async fn test_generate_falls_back_on_incomplete_plan() {
    let mut incomplete = sample_plan_json();
    incomplete["cooldown"] = json!([]);
    let provider = ScriptedProvider::reply(incomplete.to_string());
    let app = TestApp::with_provider(Some(provider as Arc<dyn LlmProvider>)).await;
    let token = register(&app, "incomplete@example.com").await;

    let body = generate(&app, &token).await;

    assert_eq!(body["session"]["workoutPlan"], default_plan_json());
}

#[tokio::test]
async fn test_generate_falls_back_on_provider_errors() {
    for code in [
        ErrorCode::ExternalTimeout,
        ErrorCode::ExternalServiceUnavailable,
        ErrorCode::ExternalRateLimited,
        ErrorCode::ExternalServiceError,
    ] {
        let provider = ScriptedProvider::failing(code);
        let app = TestApp::with_provider(Some(provider as Arc<dyn LlmProvider>)).await;
        let token = register(&app, "errors@example.com").await;

        let body = generate(&app, &token).await;

        assert_eq!(body["success"], true, "{code} must not reach the caller");
        assert_eq!(body["session"]["workoutPlan"], default_plan_json());
    }
}

#[tokio::test]
async fn test_generated_session_round_trips() {
    let provider = ScriptedProvider::reply(sample_plan_json().to_string());
    let app = TestApp::with_provider(Some(provider as Arc<dyn LlmProvider>)).await;
    let token = register(&app, "roundtrip@example.com").await;

    let created = generate(&app, &token).await;
    let id = created["session"]["id"].as_str().unwrap();

    let response = AxumTestRequest::get(&app.path(&format!("/workout/{id}")))
        .bearer(&token)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);
    let fetched: Value = response.json();

    assert_eq!(fetched["success"], true);
    assert_eq!(fetched["session"]["workoutPlan"], created["session"]["workoutPlan"]);
    assert_eq!(fetched["session"]["createdAt"], created["session"]["createdAt"]);
    assert_eq!(fetched["session"]["morphology"], "mésomorphe");
    assert_eq!(fetched["session"]["height"], 170.0);
    assert_eq!(fetched["session"]["weight"], 65.5);

    let plan: Plan = serde_json::from_value(fetched["session"]["workoutPlan"].clone()).unwrap();
    assert!(plan.is_complete());
}

#[tokio::test]
async fn test_generate_requires_body_attributes() {
    let app = TestApp::new().await;
    let token = register(&app, "missing@example.com").await;

    for body in [
        json!({"height": 170, "weight": 65}),
        json!({"morphology": "ectomorphe", "weight": 65}),
        json!({"morphology": "ectomorphe", "height": "", "weight": 65}),
    ] {
        let response = AxumTestRequest::post(&app.path("/workout"))
            .bearer(&token)
            .json(&body)
            .send(app.router())
            .await;
        assert_eq!(response.status(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "Morphologie, taille et poids sont requis");
    }

    let response = AxumTestRequest::post(&app.path("/workout"))
        .bearer(&token)
        .json(&json!({"morphology": "ectomorphe", "height": 0, "weight": 65}))
        .send(app.router())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_generate_requires_token() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post(&app.path("/workout"))
        .json(&json!({"morphology": "ectomorphe", "height": 180, "weight": 70}))
        .send(app.router())
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_multipart_upload_stores_photo() {
    let app = TestApp::new().await;
    let token = register(&app, "photo@example.com").await;
    let photo = b"\xFF\xD8\xFF\xE0fake-jpeg-bytes";

    let form = MultipartForm::new()
        .text("morphology", "endomorphe")
        .text("height", "165")
        .text("weight", "72")
        .file("photo", "ma photo.jpg", "image/jpeg", photo);

    let response = AxumTestRequest::post(&app.path("/workout"))
        .bearer(&token)
        .multipart(form)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();

    let photo_url = body["session"]["photoUrl"].as_str().unwrap().to_owned();
    assert!(photo_url.starts_with("/uploads/"));
    assert!(photo_url.ends_with("-ma_photo.jpg"));
    assert_well_formed(&body["session"]["workoutPlan"]);

    let stored_name = photo_url.trim_start_matches("/uploads/");
    let on_disk = std::fs::read(app.upload_dir.path().join(stored_name)).unwrap();
    assert_eq!(on_disk, photo);

    let served = AxumTestRequest::get(&photo_url).send(app.router()).await;
    assert_eq!(served.status(), 200);
    assert_eq!(served.bytes(), photo);
}

#[tokio::test]
async fn test_failed_insert_leaves_no_orphaned_photo() {
    let app = TestApp::new().await;
    let token = register(&app, "orphan@example.com").await;
    sqlx::query("DROP TABLE workout_sessions")
        .execute(app.resources.database.pool())
        .await
        .unwrap();

    let form = MultipartForm::new()
        .text("morphology", "endomorphe")
        .text("height", "165")
        .text("weight", "72")
        .file("photo", "photo.jpg", "image/jpeg", b"jpeg");

    let response = AxumTestRequest::post(&app.path("/workout"))
        .bearer(&token)
        .multipart(form)
        .send(app.router())
        .await;

    assert_eq!(response.status(), 500);
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_multipart_without_photo() {
    let app = TestApp::new().await;
    let token = register(&app, "nophoto@example.com").await;

    let form = MultipartForm::new()
        .text("morphology", "ectomorphe")
        .text("height", "181.5")
        .text("weight", "70");

    let response = AxumTestRequest::post(&app.path("/workout"))
        .bearer(&token)
        .multipart(form)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert!(body["session"]["photoUrl"].is_null());
}

#[tokio::test]
async fn test_history_is_capped_and_newest_first() {
    let app = TestApp::new().await;
    let token = register(&app, "history@example.com").await;

    let mut created_ids = Vec::new();
    for _ in 0..22 {
        let body = generate(&app, &token).await;
        created_ids.push(body["session"]["id"].as_str().unwrap().to_owned());
    }

    let response = AxumTestRequest::get(&app.path("/workout/history"))
        .bearer(&token)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let sessions = body["sessions"].as_array().unwrap();

    assert_eq!(sessions.len(), 20);
    let returned_ids: Vec<&str> = sessions.iter().map(|s| s["id"].as_str().unwrap()).collect();
    let expected: Vec<&str> = created_ids.iter().rev().take(20).map(String::as_str).collect();
    assert_eq!(returned_ids, expected);

    let timestamps: Vec<&str> = sessions
        .iter()
        .map(|s| s["createdAt"].as_str().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_history_is_empty_for_new_user() {
    let app = TestApp::new().await;
    let token = register(&app, "empty@example.com").await;

    let response = AxumTestRequest::get(&app.path("/workout/history"))
        .bearer(&token)
        .send(app.router())
        .await;
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["sessions"], json!([]));
}

#[tokio::test]
async fn test_sessions_are_isolated_between_users() {
    let app = TestApp::new().await;
    let owner = register(&app, "owner@example.com").await;
    let intruder = register(&app, "intruder@example.com").await;

    let created = generate(&app, &owner).await;
    let id = created["session"]["id"].as_str().unwrap();

    let response = AxumTestRequest::get(&app.path(&format!("/workout/{id}")))
        .bearer(&intruder)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Séance introuvable");

    let response = AxumTestRequest::get(&app.path("/workout/history"))
        .bearer(&intruder)
        .send(app.router())
        .await;
    let body: Value = response.json();
    assert_eq!(body["sessions"], json!([]));
}

#[tokio::test]
async fn test_unknown_or_unparsable_session_id_is_not_found() {
    let app = TestApp::new().await;
    let token = register(&app, "lookup@example.com").await;

    for id in ["not-a-uuid", "6f1c1e9a-95b5-4c1e-9d0b-2a4f3c1e8b7d"] {
        let response = AxumTestRequest::get(&app.path(&format!("/workout/{id}")))
            .bearer(&token)
            .send(app.router())
            .await;
        assert_eq!(response.status(), 404, "{id}");
    }
}
