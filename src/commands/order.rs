// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Order command - print unit names in load order.

use tracing::info;

use crate::cli::OrderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::manifest;

/// Run the order command.
pub fn run(args: &OrderArgs, config: &Config) -> Result<()> {
    println!("{}", output(args, config)?);
    Ok(())
}

fn output(args: &OrderArgs, config: &Config) -> Result<String> {
    let mut container = manifest::load(&args.manifest, config.resolver_options())?;
    let names = container.map(|unit| unit.name.clone())?;
    info!("Ordered {} units", names.len());

    super::render(&names, args.format.unwrap_or(config.format))
}
