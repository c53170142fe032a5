// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # spacey-deps
//!
//! Load ordering for bundled JavaScript sources.
//!
//! Every source unit declares the hierarchical names it provides (such as
//! `Core/Class`) and the names it depends on, where a dependency segment may
//! be `*`. A [`Container`] resolves dependencies through a
//! [`NamespaceTree`] and keeps its units in an order where every provider
//! loads before its dependents.
//!
//! ## Quick Start
//!
//! ```rust
//! use spacey_deps::{Container, SourceUnit};
//! use std::sync::Arc;
//!
//! let mut container = Container::new();
//! container
//!     .push(Arc::new(SourceUnit::new("Fx.js").with_provides(["Fx/Tween"]).with_requires(["Core/*"])))
//!     .push(Arc::new(SourceUnit::new("Core.js").with_provides(["Core/Core"])));
//!
//! let order = container.map(|unit| unit.name.clone())?;
//! assert_eq!(order, ["Core.js", "Fx.js"]);
//! # Ok::<(), spacey_deps::DepsError>(())
//! ```
//!
//! ## Policies
//!
//! A dependency that matches no provider adds no ordering constraint unless
//! [`ResolverOptions::strict_dependencies`] is set. When two units provide
//! the same name, [`DuplicateProvides`] decides between last-wins and
//! rejection. Cycles always fail with [`DepsError::CyclicDependency`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod error;
pub mod namespace;
pub mod options;
pub mod unit;

pub use container::Container;
pub use error::{DepsError, Result};
pub use namespace::NamespaceTree;
pub use options::{DuplicateProvides, ResolverOptions};
pub use unit::{IntoUnits, SourceUnit, Unit};
