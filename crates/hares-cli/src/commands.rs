// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use hares_api::{Credentials, Id, User};
use hares_common_dom::Document;
use hares_common_i18n::{
	available_locales, detect, interpolations, FixedLanguage, LanguageSource, Locale, LocaleStore,
	PageLocation, SystemLanguage, TranslateOptions, UnsupportedLocale,
};
use hares_ui::{apply_user_context, load_user_context, PageShell};
use serde_json::Map;
use tracing::info;

use crate::app::{App, AppError, Result};
use crate::cli::{Command, LocaleAction};

const PREVIEW_NAME: &str = "Preview";

pub async fn run(
	app: &App,
	command: Command,
	locale: Option<&str>,
	out: &mut dyn Write,
) -> Result<()> {
	match command {
		Command::Render {
			page,
			as_role,
			root,
			out: path,
		} => render(app, &page, as_role, root, locale, path, out).await,
		Command::Translate { key, args } => translate(app, &key, args, locale, out).await,
		Command::Locale { action } => {
			locale_command(app, action.unwrap_or(LocaleAction::Show), out)
		}
		Command::Login { email, password } => login(app, email, password, out).await,
		Command::Logout => {
			let api = app.api()?;
			hares_ui::logout(api.session());
			writeln!(out, "Signed out")?;
			Ok(())
		}
		Command::Whoami => whoami(app, out).await,
		Command::Config => {
			writeln!(out, "{:#?}", app.config())?;
			Ok(())
		}
	}
}

fn preview_user(role: String) -> User {
	User {
		id: Id::from(0u64),
		name: PREVIEW_NAME.to_string(),
		email: None,
		role_name: role,
		institution_id: None,
		branch_id: None,
		can_create_branches: None,
		extra: Map::new(),
	}
}

async fn render(
	app: &App,
	page: &str,
	as_role: Option<String>,
	root: bool,
	locale: Option<&str>,
	path: Option<PathBuf>,
	out: &mut dyn Write,
) -> Result<()> {
	let (user, preview) = match as_role {
		Some(role) => (preview_user(role), true),
		None => {
			let api = app.api()?;
			let user = api.session().current_user().ok_or(AppError::NotSignedIn)?;
			(user, false)
		}
	};

	let location = if root {
		PageLocation::new(format!("/{page}"))
	} else {
		PageLocation::new(format!("/pages/{page}"))
	};
	let i18n = app.i18n(&location, locale)?;
	let current = i18n.init(&mut Document::new()).await;

	let mut document = PageShell::new(page, &user).nested(!root).document(&i18n);
	i18n.set_locale(current.as_str(), &mut document).await;

	if !preview {
		let api = app.api()?;
		let context = load_user_context(&api, &user).await;
		apply_user_context(&mut document, &context);
	}

	let html = document.to_html();
	match path {
		Some(path) => {
			std::fs::write(&path, html)?;
			info!(path = %path.display(), page, locale = %current, "page written");
		}
		None => writeln!(out, "{html}")?,
	}
	Ok(())
}

async fn translate(
	app: &App,
	key: &str,
	args: Vec<(String, String)>,
	locale: Option<&str>,
	out: &mut dyn Write,
) -> Result<()> {
	let i18n = app.i18n(&PageLocation::default(), locale)?;
	i18n.init(&mut Document::new()).await;

	let options = TranslateOptions::with_values(interpolations(args));
	writeln!(out, "{}", i18n.t_with(key, &options))?;
	Ok(())
}

fn locale_command(app: &App, action: LocaleAction, out: &mut dyn Write) -> Result<()> {
	let store = LocaleStore::new(Arc::clone(app.store()));

	match action {
		LocaleAction::Show => {
			let language: Box<dyn LanguageSource> = match &app.config().i18n.language {
				Some(language) => Box::new(FixedLanguage::new(language.clone())),
				None => Box::new(SystemLanguage),
			};
			let effective = detect(&store, language.as_ref());
			writeln!(out, "stored: {}", store.read().as_deref().unwrap_or("(none)"))?;
			writeln!(
				out,
				"effective: {} ({})",
				effective,
				effective.direction().as_html_dir()
			)?;
		}
		LocaleAction::Set { code } => {
			let locale: Locale = code
				.parse()
				.map_err(|e: UnsupportedLocale| AppError::InvalidArgument(e.to_string()))?;
			store.try_write(locale)?;
			writeln!(out, "locale set to {locale}")?;
		}
		LocaleAction::List => {
			for info in available_locales() {
				writeln!(
					out,
					"{}\t{}\t{}\t{}",
					info.code,
					info.name,
					info.native_name,
					info.direction.as_html_dir()
				)?;
			}
		}
	}
	Ok(())
}

async fn login(app: &App, email: String, password: String, out: &mut dyn Write) -> Result<()> {
	let api = app.api()?;
	let response = api
		.auth()
		.login(&Credentials { email, password })
		.await?;
	writeln!(
		out,
		"Signed in as {} ({})",
		response.user.name, response.user.role_name
	)?;
	Ok(())
}

async fn whoami(app: &App, out: &mut dyn Write) -> Result<()> {
	let api = app.api()?;
	let user = api.session().current_user().ok_or(AppError::NotSignedIn)?;
	let context = load_user_context(&api, &user).await;

	writeln!(out, "{}", user.name)?;
	if let Some(email) = &user.email {
		writeln!(out, "{email}")?;
	}
	writeln!(out, "{context}")?;
	Ok(())
}
