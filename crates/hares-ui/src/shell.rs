// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Skeleton of an authenticated page: sidebar, header and an empty main area.

use hares_api::User;
use hares_common_dom::{Document, Element};
use hares_common_i18n::{I18n, KEY_ATTR};

use crate::header::{Header, HEADER_ID};
use crate::sidebar::{set_active_nav, Sidebar, NAV_ITEMS, SIDEBAR_ID};
use crate::titles::page_title;

pub const CONTENT_ID: &str = "content";

const DASHBOARD_TITLE_KEY: &str = "dashboard.title";

/// Navigation id for a page file: `loans-view.html` belongs to `loans`,
/// `search-logs.html` to `search-logs`.
pub fn page_id(file: &str) -> &str {
	let name = file.rsplit('/').next().unwrap_or(file);
	let stem = name.strip_suffix(".html").unwrap_or(name);
	if NAV_ITEMS.iter().any(|item| item.page_id == stem) {
		return stem;
	}
	match stem.rsplit_once('-') {
		Some((base, _)) => base,
		None => stem,
	}
}

#[derive(Debug, Clone)]
pub struct PageShell<'a> {
	file: &'a str,
	user: &'a User,
	nested: bool,
}

impl<'a> PageShell<'a> {
	pub fn new(file: &'a str, user: &'a User) -> Self {
		Self {
			file,
			user,
			nested: true,
		}
	}

	/// Pages under `pages/` reference assets with `../`.
	pub fn nested(mut self, nested: bool) -> Self {
		self.nested = nested;
		self
	}

	/// Builds the page with every label translated into the current locale.
	pub fn document(&self, i18n: &I18n) -> Document {
		let prefix = if self.nested { "../" } else { "" };
		let mut document = Document::new();

		let head = document.head();
		document.append(head, Element::new("meta").attr("charset", "UTF-8"));
		document.append(
			head,
			Element::new("title")
				.attr(KEY_ATTR, "common.app_name")
				.text(i18n.t("common.app_name")),
		);
		document.append(
			head,
			Element::new("link")
				.attr("rel", "stylesheet")
				.attr("href", format!("{prefix}css/styles.css")),
		);

		let (title_key, subtitle_key) = match page_title(self.file) {
			Some(title) => (title.title_key, Some(title.subtitle_key)),
			None => (DASHBOARD_TITLE_KEY, None),
		};
		let title = i18n.t(title_key);
		let subtitle = subtitle_key.map(|key| i18n.t(key));

		let mut header = Header::new(&title, self.user).title_key(title_key);
		if let (Some(text), Some(key)) = (subtitle.as_deref(), subtitle_key) {
			header = header.subtitle(text).subtitle_key(key);
		}
		let logo = format!("{prefix}logo.png");

		let body = document.body();
		document.append(
			body,
			Element::new("div")
				.class("layout")
				.child(
					Element::new("aside")
						.id(SIDEBAR_ID)
						.child(Sidebar::new(self.user).logo_src(&logo).render(i18n)),
				)
				.child(
					Element::new("div")
						.class("main-content")
						.child(Element::new("div").id(HEADER_ID).child(header.render(i18n)))
						.child(Element::new("main").id(CONTENT_ID)),
				),
		);

		set_active_nav(&mut document, page_id(self.file));
		document
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{english, user};

	#[test]
	fn test_page_id() {
		assert_eq!(page_id("loans.html"), "loans");
		assert_eq!(page_id("loans-view.html"), "loans");
		assert_eq!(page_id("pages/search-logs.html"), "search-logs");
		assert_eq!(page_id("branches-new.html"), "branches");
		assert_eq!(page_id("dashboard"), "dashboard");
	}

	#[tokio::test]
	async fn test_shell_layout() {
		let i18n = english().await;
		let u = user("Super Admin", None);
		let doc = PageShell::new("customers-edit.html", &u).document(&i18n);

		let heading = doc.query_by_tag("h1")[0];
		assert_eq!(doc.text_content(heading), "Edit Customer");
		assert_eq!(doc.attribute(heading, KEY_ATTR), Some("customers.edit_customer"));

		let link = doc.get_element_by_id("nav-customers").unwrap();
		assert!(doc.has_class(link, "active"));
		assert!(doc.get_element_by_id(CONTENT_ID).is_some());

		let html = doc.to_html();
		assert!(html.contains(r#"href="../css/styles.css""#));
		assert!(html.contains("Update customer information"));
	}

	#[tokio::test]
	async fn test_unknown_page_uses_dashboard_title() {
		let i18n = english().await;
		let u = user("Branch", None);
		let doc = PageShell::new("dashboard.html", &u).nested(false).document(&i18n);

		let heading = doc.query_by_tag("h1")[0];
		assert_eq!(doc.text_content(heading), "Dashboard");
		assert!(doc.to_html().contains(r#"src="logo.png""#));
	}

	#[tokio::test]
	async fn test_shell_follows_locale_switch() {
		let i18n = english().await;
		let u = user("Super Admin", None);
		let mut doc = PageShell::new("loans.html", &u).document(&i18n);

		i18n.set_locale("ar", &mut doc).await;

		let heading = doc.query_by_tag("h1")[0];
		assert_eq!(doc.text_content(heading), i18n.t("loans.title"));
		let root = doc.root();
		assert_eq!(doc.attribute(root, "dir"), Some("rtl"));
	}
}
