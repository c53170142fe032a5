// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Command implementations.

pub mod config;
pub mod files;
pub mod order;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Render a listing in the requested format.
pub(crate) fn render(entries: &[String], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::List => entries.join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(entries)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let entries = vec!["Core.js".to_string(), "Fx.js".to_string()];
        assert_eq!(render(&entries, OutputFormat::List).unwrap(), "Core.js\nFx.js");

        let json = render(&entries, OutputFormat::Json).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entries);
    }
}
