// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Source units: the items being ordered.
//!
//! A unit is produced by whatever layer parses source files. The resolver
//! only looks at the names a unit provides and depends on, and at the files
//! it requires once an order has been found.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// A source item that declares provided and required hierarchical names.
///
/// Equality is identity: two units comparing equal are the same unit and
/// will only be stored once by a [`Container`](crate::Container).
pub trait Unit {
    /// Display name used in logs and errors.
    fn name(&self) -> &str;

    /// Hierarchical names this unit makes available, e.g. `Core/Class`.
    fn provides(&self) -> &[String];

    /// Hierarchical names this unit needs loaded first. Segments may be `*`.
    fn dependencies(&self) -> &[String];

    /// Files that must be emitted for this unit.
    fn required_files(&self) -> &[PathBuf];
}

/// Plain unit description, as found in bundle manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceUnit {
    /// Unit name, usually the source path
    pub name: String,
    /// Provided names
    pub provides: Vec<String>,
    /// Dependency patterns
    #[serde(alias = "dependencies")]
    pub requires: Vec<String>,
    /// Files emitted for the unit
    pub files: Vec<PathBuf>,
}

impl SourceUnit {
    /// Create a unit with no declarations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add provided names.
    pub fn with_provides<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.provides.contains(&name) {
                self.provides.push(name);
            }
        }
        self
    }

    /// Add dependency patterns.
    pub fn with_requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add required files.
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }
}

impl Unit for SourceUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn provides(&self) -> &[String] {
        &self.provides
    }

    fn dependencies(&self) -> &[String] {
        &self.requires
    }

    fn required_files(&self) -> &[PathBuf] {
        &self.files
    }
}

/// Anything that can be pushed into a container: a unit, nothing, or an
/// arbitrarily nested grouping of units.
pub trait IntoUnits<U> {
    /// Append every unit in `self`, flattened, to `out`.
    fn flatten_into(self, out: &mut Vec<Arc<U>>);
}

impl<U> IntoUnits<U> for Arc<U> {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        out.push(self);
    }
}

impl<U> IntoUnits<U> for &Arc<U> {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        out.push(Arc::clone(self));
    }
}

impl<U, T: IntoUnits<U>> IntoUnits<U> for Option<T> {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        if let Some(inner) = self {
            inner.flatten_into(out);
        }
    }
}

impl<U, T: IntoUnits<U>> IntoUnits<U> for Vec<T> {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        for item in self {
            item.flatten_into(out);
        }
    }
}

impl<U> IntoUnits<U> for &[Arc<U>] {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        out.extend(self.iter().cloned());
    }
}
