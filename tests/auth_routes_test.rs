// ABOUTME: Integration tests for registration and login routes
// ABOUTME: Covers validation, duplicate emails, credentials and token issuance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{registration, TestApp};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_returns_token_and_public_user() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post(&app.path("/register"))
        .json(&registration("  Camille@Example.COM "))
        .send(app.router())
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| t.split('.').count() == 3));
    assert_eq!(body["user"]["email"], "camille@example.com");
    assert_eq!(body["user"]["name"], "Camille");
    assert_eq!(body["user"]["gender"], "female");
    assert_eq!(body["user"]["age"], 29);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_twice_is_rejected() {
    let app = TestApp::new().await;

    let first = AxumTestRequest::post(&app.path("/register"))
        .json(&registration("dup@example.com"))
        .send(app.router())
        .await;
    assert_eq!(first.status(), 201);

    let second = AxumTestRequest::post(&app.path("/register"))
        .json(&registration("DUP@example.com"))
        .send(app.router())
        .await;
    assert_eq!(second.status(), 400);
    let body: Value = second.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Cet email est déjà utilisé");
    assert_eq!(body["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_requires_every_field() {
    let app = TestApp::new().await;

    for field in ["email", "password", "name", "gender", "age"] {
        let mut body = registration("missing@example.com");
        body[field] = json!("");

        let response = AxumTestRequest::post(&app.path("/register"))
            .json(&body)
            .send(app.router())
            .await;
        assert_eq!(response.status(), 400, "blank {field} must be rejected");
        let body: Value = response.json();
        assert_eq!(body["error"], "Tous les champs sont requis");
    }
}

#[tokio::test]
async fn test_register_accepts_age_as_text() {
    let app = TestApp::new().await;
    let mut body = registration("text-age@example.com");
    body["age"] = json!("34");

    let response = AxumTestRequest::post(&app.path("/register"))
        .json(&body)
        .send(app.router())
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["user"]["age"], 34);
}

#[tokio::test]
async fn test_register_rejects_invalid_values() {
    let app = TestApp::new().await;

    let mut bad_gender = registration("gender@example.com");
    bad_gender["gender"] = json!("other");
    let response = AxumTestRequest::post(&app.path("/register"))
        .json(&bad_gender)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 400);

    let mut bad_age = registration("age@example.com");
    bad_age["age"] = json!(-4);
    let response = AxumTestRequest::post(&app.path("/register"))
        .json(&bad_age)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post(&app.path("/register"))
        .raw("application/json", "{\"email\": ")
        .send(app.router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = TestApp::new().await;
    AxumTestRequest::post(&app.path("/register"))
        .json(&registration("login@example.com"))
        .send(app.router())
        .await;

    let response = AxumTestRequest::post(&app.path("/login"))
        .json(&json!({"email": "LOGIN@example.com", "password": "motdepasse123"}))
        .send(app.router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "login@example.com");

    let token = body["token"].as_str().unwrap();
    let profile = AxumTestRequest::get(&app.path("/profile"))
        .bearer(token)
        .send(app.router())
        .await;
    assert_eq!(profile.status(), 200);
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let app = TestApp::new().await;
    AxumTestRequest::post(&app.path("/register"))
        .json(&registration("known@example.com"))
        .send(app.router())
        .await;

    for (email, password) in [
        ("known@example.com", "wrong-password"),
        ("unknown@example.com", "motdepasse123"),
    ] {
        let response = AxumTestRequest::post(&app.path("/login"))
            .json(&json!({"email": email, "password": password}))
            .send(app.router())
            .await;
        assert_eq!(response.status(), 401);
        let body: Value = response.json();
        assert_eq!(body["error"], "Email ou mot de passe incorrect");
    }
}

#[tokio::test]
async fn test_login_requires_email_and_password() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post(&app.path("/login"))
        .json(&json!({"email": "someone@example.com"}))
        .send(app.router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email et mot de passe requis");
}
