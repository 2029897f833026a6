// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The locale switch controller.
//!
//! [`I18n`] owns the current locale and the bundle cache. Switching locale
//! loads the bundle, updates the document's language and direction, persists
//! the choice, re-translates the page and notifies subscribers, in that order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use hares_common_dom::{Document, Element};
use hares_common_storage::SharedStore;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::detect::{detect, LanguageSource, SystemLanguage};
use crate::interpolate::{interpolate, interpolations, Interpolations, TranslateOptions};
use crate::loader::BundleLoader;
use crate::locale::{Direction, Locale, DEFAULT_LOCALE};
use crate::page::PageLocation;
use crate::source::BundleSource;
use crate::store::LocaleStore;
use crate::translate::{translate_page, Translator};

/// Element id of the right-to-left stylesheet link.
pub const RTL_STYLESHEET_ID: &str = "rtl-styles";
/// Class toggled on `<html>` while a right-to-left locale is active.
pub const RTL_CLASS: &str = "rtl";

/// Sent to subscribers after every completed locale switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleChanged {
	pub locale: Locale,
}

/// Handle returned by [`I18n::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&LocaleChanged) + Send + Sync>;

pub struct I18nBuilder {
	source: Arc<dyn BundleSource>,
	store: Option<SharedStore>,
	language: Arc<dyn LanguageSource>,
	page: PageLocation,
}

impl I18nBuilder {
	pub fn store(mut self, store: SharedStore) -> Self {
		self.store = Some(store);
		self
	}

	pub fn language_source<L>(mut self, language: L) -> Self
	where
		L: LanguageSource + 'static,
	{
		self.language = Arc::new(language);
		self
	}

	pub fn page(mut self, page: PageLocation) -> Self {
		self.page = page;
		self
	}

	pub fn build(self) -> I18n {
		let store = self
			.store
			.unwrap_or_else(|| Arc::new(hares_common_storage::MemoryStore::new()));
		let (ready_tx, _) = watch::channel(false);

		I18n {
			loader: BundleLoader::from_shared(self.source),
			store: LocaleStore::new(store),
			language: self.language,
			page: self.page,
			current: RwLock::new(DEFAULT_LOCALE),
			subscribers: RwLock::new(Vec::new()),
			next_subscription: AtomicU64::new(1),
			ready_tx,
		}
	}
}

/// Locale state for one page.
///
/// Shared as `Arc<I18n>`. The only suspension point is the bundle fetch in
/// [`I18n::set_locale`].
pub struct I18n {
	loader: BundleLoader,
	store: LocaleStore,
	language: Arc<dyn LanguageSource>,
	page: PageLocation,
	current: RwLock<Locale>,
	subscribers: RwLock<Vec<(SubscriptionId, Listener)>>,
	next_subscription: AtomicU64,
	ready_tx: watch::Sender<bool>,
}

impl I18n {
	pub fn builder<S>(source: S) -> I18nBuilder
	where
		S: BundleSource + 'static,
	{
		Self::builder_shared(Arc::new(source))
	}

	pub fn builder_shared(source: Arc<dyn BundleSource>) -> I18nBuilder {
		I18nBuilder {
			source,
			store: None,
			language: Arc::new(SystemLanguage),
			page: PageLocation::default(),
		}
	}

	/// Detects the starting locale, applies it, then marks the controller
	/// ready. Readiness is settled even if the bundle failed to load.
	pub async fn init(&self, document: &mut Document) -> Locale {
		let detected = detect(&self.store, self.language.as_ref());
		let locale = self.set_locale(detected.as_str(), document).await;

		self.ready_tx.send_if_modified(|ready| {
			let changed = !*ready;
			*ready = true;
			changed
		});
		info!(%locale, loaded = ?self.loaded_locales(), "i18n ready");
		locale
	}

	/// Resolves once [`I18n::init`] has completed.
	pub async fn wait_ready(&self) {
		let mut rx = self.ready_tx.subscribe();
		// The sender lives in `self`, so the channel cannot close while we wait.
		let _ = rx.wait_for(|ready| *ready).await;
	}

	pub fn is_ready(&self) -> bool {
		*self.ready_tx.borrow()
	}

	/// Switches to `requested`, or to the default locale if it is unsupported.
	///
	/// Always runs every step, even when `requested` is already current.
	pub async fn set_locale(&self, requested: &str, document: &mut Document) -> Locale {
		let locale = match Locale::from_code(requested) {
			Some(locale) => locale,
			None => {
				warn!(requested, fallback = %DEFAULT_LOCALE, "unsupported locale");
				DEFAULT_LOCALE
			}
		};

		// Failure is already logged by the loader; lookups degrade to fallbacks.
		let _ = self.loader.load(locale).await;

		*self.current.write().unwrap_or_else(PoisonError::into_inner) = locale;

		self.apply_direction(locale, document);
		self.store.write(locale);
		translate_page(self, document);
		self.notify(&LocaleChanged { locale });

		info!(%locale, "language changed");
		locale
	}

	fn apply_direction(&self, locale: Locale, document: &mut Document) {
		let root = document.root();
		let direction = locale.direction();
		document.set_attribute(root, "lang", locale.as_str());
		document.set_attribute(root, "dir", direction.as_html_dir());

		let existing = document.get_element_by_id(RTL_STYLESHEET_ID);
		if direction.is_rtl() {
			document.add_class(root, RTL_CLASS);
			if existing.is_none() {
				let link = Element::new("link")
					.id(RTL_STYLESHEET_ID)
					.attr("rel", "stylesheet")
					.attr("href", self.page.stylesheet_href());
				let head = document.head();
				document.append(head, link);
			}
		} else {
			document.remove_class(root, RTL_CLASS);
			if let Some(link) = existing {
				document.remove(link);
			}
		}
	}

	pub fn current_locale(&self) -> Locale {
		*self.current.read().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn direction(&self) -> Direction {
		self.current_locale().direction()
	}

	pub fn is_rtl(&self) -> bool {
		self.direction().is_rtl()
	}

	pub fn supported_locales(&self) -> &'static [Locale] {
		&Locale::ALL
	}

	pub fn loaded_locales(&self) -> Vec<Locale> {
		self.loader.loaded_locales()
	}

	pub fn page(&self) -> &PageLocation {
		&self.page
	}

	/// Translates `key` in the current locale.
	pub fn t(&self, key: &str) -> String {
		self.resolve(key, self.current_locale(), &Interpolations::new())
	}

	/// Translates `key` with options; `options.locale` overrides the current
	/// locale for this call.
	pub fn t_with(&self, key: &str, options: &TranslateOptions) -> String {
		let locale = options.locale.unwrap_or_else(|| self.current_locale());
		self.resolve(key, locale, &options.values)
	}

	/// Translates `key` with `(name, value)` substitutions.
	pub fn t_fmt(&self, key: &str, args: &[(&str, &str)]) -> String {
		self.resolve(key, self.current_locale(), &interpolations(args.iter().copied()))
	}

	pub fn t_in(&self, locale: Locale, key: &str) -> String {
		self.resolve(key, locale, &Interpolations::new())
	}

	/// Looks `key` up in `locale`, then in the default locale, then gives the
	/// key back unchanged. A bundle that never loaded behaves as empty.
	pub fn resolve(&self, key: &str, locale: Locale, values: &Interpolations) -> String {
		let found = self
			.loader
			.get(locale)
			.and_then(|bundle| bundle.lookup(key).map(|s| interpolate(s, values).into_owned()));
		if let Some(text) = found {
			return text;
		}

		if locale != DEFAULT_LOCALE {
			let fallback = self.loader.get(DEFAULT_LOCALE).and_then(|bundle| {
				bundle
					.lookup(key)
					.map(|s| interpolate(s, values).into_owned())
			});
			if let Some(text) = fallback {
				return text;
			}
		}

		warn!(key, %locale, "missing translation");
		key.to_string()
	}

	/// Registers a listener called after each locale switch.
	///
	/// Listeners run synchronously on the switching task, in subscription order.
	pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
	where
		F: Fn(&LocaleChanged) + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
		self.subscribers
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.push((id, Arc::new(listener)));
		id
	}

	/// Returns whether a listener was removed.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
		let before = subscribers.len();
		subscribers.retain(|(sid, _)| *sid != id);
		subscribers.len() != before
	}

	fn notify(&self, event: &LocaleChanged) {
		// Snapshot so listeners may subscribe or query the controller.
		let listeners: Vec<Listener> = self
			.subscribers
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.iter()
			.map(|(_, l)| Arc::clone(l))
			.collect();

		for listener in listeners {
			listener(event);
		}
	}
}

impl Translator for I18n {
	fn translate(&self, key: &str, options: &TranslateOptions) -> String {
		self.t_with(key, options)
	}
}

impl std::fmt::Debug for I18n {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("I18n")
			.field("current", &self.current_locale())
			.field("loader", &self.loader)
			.field("page", &self.page)
			.field("ready", &self.is_ready())
			.finish_non_exhaustive()
	}
}
