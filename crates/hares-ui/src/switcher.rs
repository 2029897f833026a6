// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Header button that flips between English and Arabic.

use std::sync::{Arc, PoisonError, RwLock};

use hares_api::User;
use hares_common_dom::Document;
use hares_common_i18n::{translate_page, I18n, Locale, SubscriptionId, KEY_ATTR};
use tracing::{debug, info};

use crate::header::{apply_user_context, Header, HEADER_ID, USER_CONTEXT_ID};
use crate::sidebar::{set_active_nav, Sidebar, SIDEBAR_ID};

pub const SWITCHER_ID: &str = "languageSwitcher";
pub const SWITCHER_LABEL_ID: &str = "currentLanguage";

const DEFAULT_TITLE: &str = "Page";

/// Label shown on the switcher while `locale` is current.
pub fn label_for(locale: Locale) -> &'static str {
	locale.info().switcher_label
}

/// The locale a click switches to.
pub fn toggle_target(current: Locale) -> Locale {
	match current {
		Locale::En => Locale::Ar,
		Locale::Ar => Locale::En,
	}
}

/// Keeps a switcher label in step with the controller.
///
/// The subscription is dropped together with the switcher.
pub struct LanguageSwitcher {
	i18n: Arc<I18n>,
	label: Arc<RwLock<&'static str>>,
	subscription: SubscriptionId,
}

impl LanguageSwitcher {
	pub fn attach(i18n: Arc<I18n>) -> Self {
		let label = Arc::new(RwLock::new(label_for(i18n.current_locale())));
		let shared = Arc::clone(&label);
		let subscription = i18n.subscribe(move |event| {
			*shared.write().unwrap_or_else(PoisonError::into_inner) = label_for(event.locale);
		});
		debug!(?subscription, "language switcher attached");

		Self {
			i18n,
			label,
			subscription,
		}
	}

	pub fn label(&self) -> &'static str {
		*self.label.read().unwrap_or_else(PoisonError::into_inner)
	}

	/// Switches to the other locale and rebuilds the page chrome.
	///
	/// The sidebar and header are re-rendered when their containers exist and
	/// `user` is known. The page title, active navigation link and user
	/// context survive the rebuild.
	pub async fn toggle(&self, document: &mut Document, user: Option<&User>) -> Locale {
		let target = toggle_target(self.i18n.current_locale());
		let locale = self.i18n.set_locale(target.as_str(), document).await;

		if let Some(user) = user {
			rerender_chrome(&self.i18n, document, user);
		}

		translate_page(self.i18n.as_ref(), document);
		self.sync_label(document);
		info!(%locale, "language toggled");
		locale
	}

	/// Writes the current label into `#currentLanguage`, if present.
	pub fn sync_label(&self, document: &mut Document) {
		if let Some(node) = document.get_element_by_id(SWITCHER_LABEL_ID) {
			document.set_text_content(node, self.label());
		}
	}
}

impl Drop for LanguageSwitcher {
	fn drop(&mut self) {
		self.i18n.unsubscribe(self.subscription);
	}
}

impl std::fmt::Debug for LanguageSwitcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LanguageSwitcher")
			.field("label", &self.label())
			.field("subscription", &self.subscription)
			.finish()
	}
}

fn rerender_chrome(i18n: &I18n, document: &mut Document, user: &User) {
	let active = document
		.query_by_attribute("id")
		.into_iter()
		.filter(|node| document.has_class(*node, "active"))
		.find_map(|node| {
			document
				.attribute(node, "id")
				.and_then(|id| id.strip_prefix("nav-"))
				.map(str::to_string)
		});

	let context = document
		.get_element_by_id(USER_CONTEXT_ID)
		.map(|node| document.text_content(node));

	let heading = document.query_by_tag("h1").into_iter().next();
	let title = heading
		.map(|node| document.text_content(node))
		.filter(|t| !t.trim().is_empty())
		.unwrap_or_else(|| DEFAULT_TITLE.to_string());
	let title_key = heading.and_then(|node| document.attribute(node, KEY_ATTR).map(str::to_string));
	let subtitle = document
		.query_by_tag("p")
		.into_iter()
		.find(|node| document.has_class(*node, "header-subtitle"));
	let subtitle_text = subtitle.map(|node| document.text_content(node));
	let subtitle_key = subtitle.and_then(|node| document.attribute(node, KEY_ATTR).map(str::to_string));

	if let Some(container) = document.get_element_by_id(SIDEBAR_ID) {
		document.replace_children(container, vec![Sidebar::new(user).render(i18n)]);
	}

	if let Some(container) = document.get_element_by_id(HEADER_ID) {
		let mut header = Header::new(&title, user);
		if let Some(key) = title_key.as_deref() {
			header = header.title_key(key);
		}
		if let Some(text) = subtitle_text.as_deref() {
			header = header.subtitle(text);
			if let Some(key) = subtitle_key.as_deref() {
				header = header.subtitle_key(key);
			}
		}
		document.replace_children(container, vec![header.render(i18n)]);
	}

	if let Some(page_id) = active {
		set_active_nav(document, &page_id);
	}
	if let Some(context) = context {
		apply_user_context(document, &context);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{english, user};
	use hares_common_i18n::Direction;

	fn page(i18n: &I18n, user: &User) -> Document {
		let mut doc = Document::new();
		let body = doc.body();
		let sidebar = doc
			.append(body, hares_common_dom::Element::new("aside").id(SIDEBAR_ID))
			.unwrap();
		let header = doc
			.append(body, hares_common_dom::Element::new("div").id(HEADER_ID))
			.unwrap();
		doc.append(sidebar, Sidebar::new(user).render(i18n));
		doc.append(
			header,
			Header::new("Loans", user)
				.title_key("navigation.loans")
				.render(i18n),
		);
		doc
	}

	#[test]
	fn test_labels_and_targets() {
		assert_eq!(label_for(Locale::En), "EN");
		assert_eq!(label_for(Locale::Ar), "ع");
		assert_eq!(toggle_target(Locale::En), Locale::Ar);
		assert_eq!(toggle_target(Locale::Ar), Locale::En);
	}

	#[tokio::test]
	async fn test_toggle_round_trip() {
		let i18n = Arc::new(english().await);
		let u = user("Super Admin", None);
		let mut doc = page(&i18n, &u);
		set_active_nav(&mut doc, "loans");
		apply_user_context(&mut doc, "Super Admin");
		let switcher = LanguageSwitcher::attach(Arc::clone(&i18n));
		assert_eq!(switcher.label(), "EN");

		assert_eq!(switcher.toggle(&mut doc, Some(&u)).await, Locale::Ar);
		assert_eq!(i18n.direction(), Direction::Rtl);
		assert_eq!(switcher.label(), "ع");

		let label = doc.get_element_by_id(SWITCHER_LABEL_ID).unwrap();
		assert_eq!(doc.text_content(label), "ع");
		let link = doc.get_element_by_id("nav-loans").unwrap();
		assert!(doc.has_class(link, "active"));
		let heading = doc.query_by_tag("h1")[0];
		assert_eq!(doc.text_content(heading), i18n.t("navigation.loans"));
		assert_ne!(doc.text_content(heading), "Loans");

		assert_eq!(switcher.toggle(&mut doc, Some(&u)).await, Locale::En);
		assert_eq!(switcher.label(), "EN");
		let heading = doc.query_by_tag("h1")[0];
		assert_eq!(doc.text_content(heading), "Loans");
		let context = doc.get_element_by_id(USER_CONTEXT_ID).unwrap();
		assert_eq!(doc.text_content(context), "Super Admin");
	}

	#[tokio::test]
	async fn test_label_follows_external_switch() {
		let i18n = Arc::new(english().await);
		let switcher = LanguageSwitcher::attach(Arc::clone(&i18n));
		let mut doc = Document::new();

		i18n.set_locale("ar", &mut doc).await;
		assert_eq!(switcher.label(), "ع");
	}

	#[tokio::test]
	async fn test_drop_unsubscribes() {
		let i18n = Arc::new(english().await);
		let switcher = LanguageSwitcher::attach(Arc::clone(&i18n));
		let id = switcher.subscription;
		drop(switcher);

		assert!(!i18n.unsubscribe(id));
	}

	#[tokio::test]
	async fn test_toggle_without_user_keeps_chrome() {
		let i18n = Arc::new(english().await);
		let mut doc = Document::new();
		let switcher = LanguageSwitcher::attach(Arc::clone(&i18n));

		assert_eq!(switcher.toggle(&mut doc, None).await, Locale::Ar);
		assert!(doc.get_element_by_id(SIDEBAR_ID).is_none());
	}
}
