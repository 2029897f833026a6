// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `hares` command-line client.

use clap::Parser;

mod app;
mod cli;
mod commands;
mod logging;

use app::App;
use cli::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Load .env file if present, before clap reads HARES_* variables
	dotenvy::dotenv().ok();

	let args = Args::parse();

	let config = match &args.config {
		Some(path) => hares_config::load_config_with_file(path)?,
		None => hares_config::load_config()?,
	};

	logging::init(&config.logging);
	tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting hares");

	let app = App::open(config)?;
	let mut stdout = std::io::stdout().lock();
	commands::run(&app, args.command, args.locale.as_deref(), &mut stdout).await?;
	Ok(())
}
