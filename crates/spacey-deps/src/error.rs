// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for dependency resolution.

use thiserror::Error;

/// Result type for dependency resolution.
pub type Result<T> = std::result::Result<T, DepsError>;

/// Errors raised while ordering source units.
#[derive(Error, Debug)]
pub enum DepsError {
    /// The units depend on each other in a loop, so no load order exists
    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CyclicDependency {
        /// Unit names along the cycle, in edge order
        cycle: Vec<String>,
    },

    /// Two distinct units provide the identical name
    #[error("'{name}' is provided by both {first} and {second}")]
    DuplicateProvision {
        /// The provided name
        name: String,
        /// Unit that provided the name first
        first: String,
        /// Unit that provided it again
        second: String,
    },

    /// A dependency matched no provider (strict mode only)
    #[error("{unit} depends on '{dependency}', which nothing provides")]
    UnresolvedDependency {
        /// Dependent unit
        unit: String,
        /// The dependency pattern that matched nothing
        dependency: String,
    },

    /// IO error while making paths absolute
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DepsError {
    /// Unit names participating in a cycle, if this is a cycle error.
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            DepsError::CyclicDependency { cycle } => Some(cycle),
            _ => None,
        }
    }
}

fn format_cycle(cycle: &[String]) -> String {
    let mut out = cycle.join(" -> ");
    if let Some(first) = cycle.first() {
        out.push_str(" -> ");
        out.push_str(first);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_closes_loop() {
        let err = DepsError::CyclicDependency {
            cycle: vec!["a.js".into(), "b.js".into()],
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: a.js -> b.js -> a.js"
        );
        assert_eq!(err.cycle().map(<[String]>::len), Some(2));
    }
}
