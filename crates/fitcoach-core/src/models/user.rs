// ABOUTME: User account model and its password-free public projection
// ABOUTME: Gender is a closed enum because the prompt renders it as a fixed label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Self-declared gender stored on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// Lowercase storage and wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("Unsupported gender '{other}' (expected male or female)")),
        }
    }
}

/// Stored user account
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Normalized (trimmed, lowercased) email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Gender used in plan generation
    pub gender: Gender,
    /// Age in years used in plan generation
    pub age: u32,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String, name: String, gender: Gender, age: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            gender,
            age,
            created_at: super::timestamp_now(),
        }
    }

    /// Normalize an email the way it is stored
    #[must_use]
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

/// User as returned to clients (no password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique identifier
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Gender
    pub gender: Gender,
    /// Age in years
    pub age: u32,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            gender: user.gender,
            age: user.age,
            created_at: user.created_at,
        }
    }
}

/// Partial profile change; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New gender
    pub gender: Option<Gender>,
    /// New age
    pub age: Option<u32>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.gender.is_none() && self.age.is_none()
    }

    /// Apply the present fields to `user`
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}
