// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Initial locale detection.
//!
//! Resolution order (highest to lowest priority):
//! 1. Stored preference (if supported)
//! 2. Runtime language's primary subtag (if supported)
//! 3. [`DEFAULT_LOCALE`]

use tracing::debug;

use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::store::LocaleStore;

/// Reports the runtime's preferred language tag, e.g. `ar-EG`.
pub trait LanguageSource: Send + Sync {
	fn language(&self) -> Option<String>;
}

/// The operating system's language, via `sys-locale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLanguage;

impl LanguageSource for SystemLanguage {
	fn language(&self) -> Option<String> {
		sys_locale::get_locale()
	}
}

/// A fixed language tag, for configuration overrides and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedLanguage(pub Option<String>);

impl FixedLanguage {
	pub fn new(tag: impl Into<String>) -> Self {
		Self(Some(tag.into()))
	}

	pub fn none() -> Self {
		Self(None)
	}
}

impl LanguageSource for FixedLanguage {
	fn language(&self) -> Option<String> {
		self.0.clone()
	}
}

/// Picks the locale to start with. Reads only; nothing is persisted.
pub fn detect(store: &LocaleStore, language: &dyn LanguageSource) -> Locale {
	if let Some(stored) = store.read() {
		if let Some(locale) = Locale::from_code(&stored) {
			debug!(%locale, "using stored locale preference");
			return locale;
		}
		debug!(stored = %stored, "ignoring unsupported stored locale");
	}

	if let Some(tag) = language.language() {
		if let Some(locale) = Locale::from_language_tag(&tag) {
			debug!(%locale, tag = %tag, "using runtime language");
			return locale;
		}
		debug!(tag = %tag, "runtime language not supported");
	}

	DEFAULT_LOCALE
}

#[cfg(test)]
mod tests {
	use super::*;
	use hares_common_storage::MemoryStore;
	use std::sync::Arc;

	fn store_with(value: Option<&str>) -> LocaleStore {
		let mem = match value {
			Some(v) => MemoryStore::with_entries([("locale", v)]),
			None => MemoryStore::new(),
		};
		LocaleStore::new(Arc::new(mem))
	}

	#[test]
	fn test_stored_preference_wins() {
		let store = store_with(Some("ar"));
		assert_eq!(detect(&store, &FixedLanguage::new("en-US")), Locale::Ar);
	}

	#[test]
	fn test_unsupported_stored_value_is_skipped() {
		let store = store_with(Some("de"));
		assert_eq!(detect(&store, &FixedLanguage::new("ar-SA")), Locale::Ar);
	}

	#[test]
	fn test_runtime_language_primary_subtag() {
		let store = store_with(None);
		assert_eq!(detect(&store, &FixedLanguage::new("ar-EG")), Locale::Ar);
		assert_eq!(detect(&store, &FixedLanguage::new("ar_EG")), Locale::Ar);
		assert_eq!(detect(&store, &FixedLanguage::new("en-GB")), Locale::En);
	}

	#[test]
	fn test_falls_back_to_default() {
		let store = store_with(None);
		assert_eq!(detect(&store, &FixedLanguage::new("fr-FR")), Locale::En);
		assert_eq!(detect(&store, &FixedLanguage::none()), Locale::En);
	}

	#[test]
	fn test_detect_does_not_persist() {
		let store = store_with(None);
		detect(&store, &FixedLanguage::new("ar"));
		assert_eq!(store.read(), None);
	}
}
