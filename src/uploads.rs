// ABOUTME: Disk storage for progress photos attached to workout requests
// ABOUTME: Writes unique, sanitized file names and returns their public path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Photo Storage
//!
//! Photos are stored as-is; no content inspection or resizing happens here.

use crate::constants::http::UPLOADS_ROUTE;
use chrono::Utc;
use fitcoach_core::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Stores uploaded photos in a single directory
#[derive(Debug, Clone)]
pub struct PhotoStore {
    directory: PathBuf,
}

impl PhotoStore {
    /// Create the store, making sure the directory exists
    pub async fn new(directory: impl Into<PathBuf>) -> AppResult<Self> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            AppError::storage(format!(
                "Cannot create upload directory {}: {e}",
                directory.display()
            ))
            .with_source(e)
        })?;

        info!("Photo uploads stored in {}", directory.display());
        Ok(Self { directory })
    }

    /// Directory served under the uploads route
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write a photo and return its public path (`/uploads/<name>`)
    ///
    /// Clients usually send the same file name, so every stored name carries
    /// a random id next to the timestamp.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> AppResult<String> {
        let stored_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            sanitize_file_name(original_name.unwrap_or_default())
        );
        let path = self.directory.join(&stored_name);

        tokio::fs::write(&path, bytes).await?;
        debug!("Stored {} byte photo at {}", bytes.len(), path.display());

        Ok(format!("{UPLOADS_ROUTE}/{stored_name}"))
    }

    /// Delete a photo previously returned by [`Self::save`]
    pub async fn remove(&self, public_path: &str) -> AppResult<()> {
        let stored_name = public_path
            .strip_prefix(UPLOADS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| sanitize_file_name(name) == *name)
            .ok_or_else(|| AppError::invalid_input(format!("Not a stored photo: {public_path}")))?;

        tokio::fs::remove_file(self.directory.join(stored_name)).await?;
        debug!("Removed photo {stored_name}");
        Ok(())
    }
}

/// Reduce a client-supplied name to a safe single path component
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let last_component = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last_component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "photo".to_owned()
    } else {
        cleaned
    }
}
