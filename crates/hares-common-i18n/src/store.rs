// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use hares_common_storage::{SharedStore, StorageError};
use tracing::{debug, warn};

use crate::locale::Locale;

/// Storage key holding the persisted locale preference.
pub const LOCALE_KEY: &str = "locale";

/// Persists the user's locale choice in the shared key-value store.
#[derive(Clone)]
pub struct LocaleStore {
	store: SharedStore,
}

impl LocaleStore {
	pub fn new(store: SharedStore) -> Self {
		Self { store }
	}

	/// The raw stored value. Not validated; read errors count as absent.
	pub fn read(&self) -> Option<String> {
		match self.store.get(LOCALE_KEY) {
			Ok(value) => value,
			Err(e) => {
				warn!(error = %e, "failed to read stored locale");
				None
			}
		}
	}

	/// Persists the preference, logging and dropping any storage error.
	pub fn write(&self, locale: Locale) {
		if let Err(e) = self.try_write(locale) {
			warn!(%locale, error = %e, "failed to persist locale preference");
		}
	}

	pub fn try_write(&self, locale: Locale) -> Result<(), StorageError> {
		self.store.set(LOCALE_KEY, locale.as_str())?;
		debug!(%locale, "persisted locale preference");
		Ok(())
	}
}

impl std::fmt::Debug for LocaleStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocaleStore").finish_non_exhaustive()
	}
}
