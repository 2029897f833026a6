// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hares back office client.
#[derive(Parser, Debug)]
#[command(name = "hares", about = "Hares back office client", version)]
pub struct Args {
	/// Config file to use instead of ~/.config/hares/config.toml
	#[arg(long, short, global = true, env = "HARES_CONFIG")]
	pub config: Option<PathBuf>,

	/// Display language for this run only (e.g. `ar`, `en-US`)
	#[arg(long, global = true)]
	pub locale: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Render a page shell with translated navigation and header
	Render {
		/// Page file, e.g. `loans.html` or `customers-edit.html`
		page: String,

		/// Render as a preview user with this role instead of the signed-in user
		#[arg(long = "as-role", value_name = "ROLE")]
		as_role: Option<String>,

		/// Treat the page as living at the site root rather than under `pages/`
		#[arg(long)]
		root: bool,

		/// Write the HTML here instead of stdout
		#[arg(long, short)]
		out: Option<PathBuf>,
	},

	/// Resolve a translation key
	Translate {
		key: String,

		/// Interpolation value, repeatable
		#[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_key_value)]
		args: Vec<(String, String)>,
	},

	/// Show or change the stored display language
	Locale {
		#[command(subcommand)]
		action: Option<LocaleAction>,
	},

	/// Sign in and remember the session
	Login {
		#[arg(long)]
		email: String,

		#[arg(long, env = "HARES_PASSWORD", hide_env_values = true)]
		password: String,
	},

	/// Forget the stored session
	Logout,

	/// Show the signed-in user and their affiliation
	Whoami,

	/// Print the resolved configuration
	Config,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum LocaleAction {
	/// Print the stored and effective locale
	Show,
	/// Store a display language
	Set { code: String },
	/// List supported locales
	List,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
	match raw.split_once('=') {
		Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
		_ => Err(format!("expected NAME=VALUE, got '{raw}'")),
	}
}
