// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Unit manifests.
//!
//! A manifest is a JSON array of units, as emitted by the source scanner:
//!
//! ```json
//! [{"name": "Source/Fx.js", "provides": ["Fx"], "requires": ["Core/*"], "files": ["Source/Fx.js"]}]
//! ```

use spacey_deps::{Container, ResolverOptions, SourceUnit};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{BundleError, Result};

/// Parse manifest text into units.
pub fn parse(content: &str, path: &Path) -> Result<Vec<SourceUnit>> {
    serde_json::from_str(content).map_err(|source| BundleError::InvalidManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a manifest and collect its units into a container.
pub fn load(path: &Path, options: ResolverOptions) -> Result<Container<SourceUnit>> {
    let content = std::fs::read_to_string(path).map_err(|source| BundleError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let units = parse(&content, path)?;
    debug!("Loaded {} units from {}", units.len(), path.display());

    let mut container = Container::with_options(options);
    container.push(units.into_iter().map(Arc::new).collect::<Vec<_>>());
    Ok(container)
}
