// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CLI argument parsing for spacey-bundle.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use spacey_deps::DuplicateProvides;
use std::path::PathBuf;

/// spacey-bundle - resolve the load order of JavaScript source units
#[derive(Parser, Debug)]
#[command(name = "spacey-bundle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Fail when a dependency matches no provider
    #[arg(long, global = true)]
    pub strict: bool,

    /// How to treat names provided by more than one unit (last-wins, reject)
    #[arg(long, global = true)]
    pub duplicate_provides: Option<DuplicateProvides>,

    /// Read configuration from this file as well
    #[arg(long, global = true, env = "SPACEY_BUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print unit names in load order
    Order(OrderArgs),

    /// Print the files required by the units, in load order
    Files(FilesArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    /// JSON manifest: an array of units with name, provides, requires, files
    pub manifest: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct FilesArgs {
    /// JSON manifest: an array of units with name, provides, requires, files
    pub manifest: PathBuf,

    /// Print files relative to this directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// How listings are printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One entry per line
    #[default]
    List,
    /// A JSON array
    Json,
}
