// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Files command - print required files in load order.

use tracing::info;

use crate::cli::FilesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::manifest;

/// Run the files command.
pub fn run(args: &FilesArgs, config: &Config) -> Result<()> {
    println!("{}", output(args, config)?);
    Ok(())
}

fn output(args: &FilesArgs, config: &Config) -> Result<String> {
    let mut container = manifest::load(&args.manifest, config.resolver_options())?;
    let root = args.root.as_deref().or(config.root.as_deref());
    let files: Vec<String> = container
        .required_files(root)?
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    info!("Listed {} required files", files.len());

    super::render(&files, args.format.unwrap_or(config.format))
}
