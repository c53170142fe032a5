// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! spacey-bundle - load-order resolver for JavaScript bundles
//!
//! Reads a manifest of source units, sorts them so that every provider loads
//! before its dependents, and prints the resulting order or file list.

use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod manifest;

use cli::{Cli, Commands};
use config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(cli);

    match &cli.command {
        Commands::Order(args) => commands::order::run(args, &config)?,
        Commands::Files(args) => commands::files::run(args, &config)?,
        Commands::Config => commands::config::run(&config)?,
    }
    Ok(())
}

/// Log to stderr so listings on stdout stay machine readable.
fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "spacey_deps=debug,spacey_bundle=debug"
    } else if cli.quiet {
        "error"
    } else {
        "spacey_deps=warn,spacey_bundle=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();
}
