// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for spacey-bundle.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for spacey-bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Main error type for spacey-bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    /// Load ordering failed
    #[error(transparent)]
    Deps(#[from] spacey_deps::DepsError),

    /// Manifest could not be read
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Manifest is not a JSON array of units
    #[error("Invalid manifest {path}: {source}")]
    InvalidManifest {
        /// Manifest path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
