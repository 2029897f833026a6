// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page header with title, language switcher and the signed-in user.

use hares_api::{ApiClient, User};
use hares_common_dom::{Document, Element};
use hares_common_i18n::{I18n, ARIA_ATTR, KEY_ATTR};
use tracing::{debug, warn};

use crate::sidebar::{avatar, SIDEBAR_CONTEXT_ID};
use crate::switcher::{label_for, SWITCHER_ID, SWITCHER_LABEL_ID};

pub const HEADER_ID: &str = "header";
pub const USER_CONTEXT_ID: &str = "userContext";

#[derive(Debug, Clone)]
pub struct Header<'a> {
	title: &'a str,
	subtitle: Option<&'a str>,
	title_key: Option<&'a str>,
	subtitle_key: Option<&'a str>,
	user: &'a User,
}

impl<'a> Header<'a> {
	pub fn new(title: &'a str, user: &'a User) -> Self {
		Self {
			title,
			subtitle: None,
			title_key: None,
			subtitle_key: None,
			user,
		}
	}

	pub fn subtitle(mut self, subtitle: &'a str) -> Self {
		self.subtitle = Some(subtitle);
		self
	}

	/// Tags the title so it is re-translated on locale changes.
	pub fn title_key(mut self, key: &'a str) -> Self {
		self.title_key = Some(key);
		self
	}

	pub fn subtitle_key(mut self, key: &'a str) -> Self {
		self.subtitle_key = Some(key);
		self
	}

	pub fn render(&self, i18n: &I18n) -> Element {
		let mut title = Element::new("h1").class("header-title").text(self.title);
		if let Some(key) = self.title_key {
			title = title.attr(KEY_ATTR, key);
		}

		let subtitle = self.subtitle.map(|text| {
			let mut el = Element::new("p").class("header-subtitle").text(text);
			if let Some(key) = self.subtitle_key {
				el = el.attr(KEY_ATTR, key);
			}
			el
		});

		let mut heading = Element::new("div").class("header-heading").child(title);
		if let Some(subtitle) = subtitle {
			heading = heading.child(subtitle);
		}

		let switcher = Element::new("button")
			.id(SWITCHER_ID)
			.class("btn btn-secondary language-switcher")
			.attr(ARIA_ATTR, "common.switch_language")
			.attr("aria-label", i18n.t("common.switch_language"))
			.child(
				Element::new("span")
					.id(SWITCHER_LABEL_ID)
					.text(label_for(i18n.current_locale())),
			);

		let user = Element::new("div")
			.class("header-user")
			.child(
				Element::new("div")
					.class("header-user-info")
					.child(Element::new("div").class("header-user-name").text(&self.user.name))
					.child(
						Element::new("div")
							.id(USER_CONTEXT_ID)
							.class("header-user-context")
							.text(&self.user.role_name),
					),
			)
			.child(avatar(self.user));

		Element::new("header")
			.class("header")
			.child(heading)
			.child(
				Element::new("div")
					.class("header-actions")
					.child(switcher)
					.child(user),
			)
	}
}

/// Builds the affiliation label shown under the user's name.
///
/// The institution is looked up before the branch, so a failed branch lookup
/// still leaves `Role - Institution`. The first failure is logged and ends
/// the lookups, keeping whatever was composed so far.
pub async fn load_user_context(api: &ApiClient, user: &User) -> String {
	let mut context = user.role_name.clone();

	if let Some(institution_id) = &user.institution_id {
		match api.institutions().get(institution_id).await {
			Ok(institution) => context = format!("{} - {}", user.role_name, institution.name),
			Err(e) => {
				warn!(
					institution_id = %institution_id,
					error = %e,
					"failed to load institution for user context"
				);
				return context;
			}
		}
	}

	if let Some(branch_id) = &user.branch_id {
		match api.branches().get(branch_id).await {
			Ok(branch) if user.institution_id.is_some() => {
				context = format!(
					"{} - {} & {}",
					user.role_name,
					branch.name,
					branch.institution_name().unwrap_or("Institution")
				);
			}
			Ok(branch) => context = format!("{} - {}", user.role_name, branch.name),
			Err(e) => warn!(branch_id = %branch_id, error = %e, "failed to load branch for user context"),
		}
	}

	debug!(context = %context, "resolved user context");
	context
}

/// Writes `context` into the header and sidebar context slots that exist.
pub fn apply_user_context(document: &mut Document, context: &str) {
	for id in [USER_CONTEXT_ID, SIDEBAR_CONTEXT_ID] {
		if let Some(node) = document.get_element_by_id(id) {
			document.set_text_content(node, context);
		}
	}
}
