// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Resolution policy knobs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when two units provide the identical name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateProvides {
    /// The unit later in the current order owns the name; a warning is logged
    #[default]
    LastWins,
    /// Fail the sort
    Reject,
}

impl FromStr for DuplicateProvides {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-wins" => Ok(Self::LastWins),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown duplicate-provides policy '{}' (expected last-wins or reject)",
                other
            )),
        }
    }
}

impl fmt::Display for DuplicateProvides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastWins => write!(f, "last-wins"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Options controlling how dependencies are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Fail when a dependency matches no provider.
    ///
    /// Off by default: some dependency declarations are advisory, so an
    /// unmatched one only contributes no ordering constraint.
    pub strict_dependencies: bool,
    /// Policy for names provided by more than one unit
    pub duplicate_provides: DuplicateProvides,
}
