// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration management for spacey-bundle.

use serde::{Deserialize, Serialize};
use spacey_deps::{DuplicateProvides, ResolverOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::error::{BundleError, Result};

/// Name of the rc file looked up in the home and project directories.
pub const RC_FILE: &str = ".spaceybundlerc";

/// Prefix of environment variables mapped onto config keys.
pub const ENV_PREFIX: &str = "SPACEY_BUNDLE_";

/// Configuration for spacey-bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory required files are printed relative to
    pub root: Option<PathBuf>,

    /// Fail on dependencies that match no provider
    pub strict_dependencies: bool,

    /// Policy for names provided by more than one unit
    pub duplicate_provides: DuplicateProvides,

    /// Listing format
    pub format: OutputFormat,

    /// Unrecognised keys, kept for `config` output
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from the default locations, then `explicit`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        // User rc file
        if let Some(user) = user_config_path() {
            if user.exists() {
                config.merge_from_file(&user)?;
            }
        }

        // Project rc file
        let project = PathBuf::from(RC_FILE);
        if project.exists() {
            config.merge_from_file(&project)?;
        }

        // Explicit --config must exist
        if let Some(path) = explicit {
            config.merge_from_file(path)?;
        }

        config.merge_from_env(std::env::vars())?;

        Ok(config)
    }

    /// Merge `key=value` lines from a file. `#` and `;` start comments.
    pub fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        debug!("Reading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                self.set(key.trim(), value.trim())?;
            }
        }

        Ok(())
    }

    /// Merge `SPACEY_BUNDLE_*` variables, e.g. `SPACEY_BUNDLE_STRICT_DEPENDENCIES`.
    pub fn merge_from_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(config_key) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let config_key = config_key.to_lowercase().replace('_', "-");
            // The config file path itself is a CLI concern
            if config_key == "config" {
                continue;
            }
            self.set(&config_key, &value)?;
        }
        Ok(())
    }

    /// Apply command line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.strict {
            self.strict_dependencies = true;
        }
        if let Some(policy) = cli.duplicate_provides {
            self.duplicate_provides = policy;
        }
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root" => self.root = Some(PathBuf::from(value)),
            "strict-dependencies" => self.strict_dependencies = value == "true",
            "duplicate-provides" => {
                self.duplicate_provides = value.parse().map_err(BundleError::Config)?;
            }
            "format" => {
                self.format = match value {
                    "list" => OutputFormat::List,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(BundleError::Config(format!(
                            "unknown format '{}' (expected list or json)",
                            other
                        )));
                    }
                };
            }
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    /// Options handed to the resolver.
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            strict_dependencies: self.strict_dependencies,
            duplicate_provides: self.duplicate_provides,
        }
    }
}

/// Get the user config path.
fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(RC_FILE))
}
