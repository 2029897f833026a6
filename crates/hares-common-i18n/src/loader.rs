// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bundle loading with a per-locale cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::bundle::Bundle;
use crate::error::Result;
use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::source::BundleSource;

/// Loads each locale's bundle at most once and keeps it for the loader's
/// lifetime. Entries are never evicted or replaced.
pub struct BundleLoader {
	source: Arc<dyn BundleSource>,
	cache: RwLock<HashMap<Locale, Arc<Bundle>>>,
	fetch_lock: Mutex<()>,
}

impl BundleLoader {
	pub fn new<S>(source: S) -> Self
	where
		S: BundleSource + 'static,
	{
		Self::from_shared(Arc::new(source))
	}

	pub fn from_shared(source: Arc<dyn BundleSource>) -> Self {
		Self {
			source,
			cache: RwLock::new(HashMap::new()),
			fetch_lock: Mutex::new(()),
		}
	}

	/// The cached bundle, if it has been loaded.
	pub fn get(&self, locale: Locale) -> Option<Arc<Bundle>> {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.get(&locale).cloned()
	}

	pub fn is_loaded(&self, locale: Locale) -> bool {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.contains_key(&locale)
	}

	/// Locales with a cached bundle, in enum order.
	pub fn loaded_locales(&self) -> Vec<Locale> {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		let mut locales: Vec<Locale> = cache.keys().copied().collect();
		locales.sort();
		locales
	}

	/// Returns the locale's bundle, fetching it on first use.
	///
	/// When a non-default locale fails and the default bundle is not cached
	/// yet, the default is fetched as a fallback. A failure of that fetch is
	/// only logged; the first error is returned either way.
	pub async fn load(&self, locale: Locale) -> Result<Arc<Bundle>> {
		if let Some(bundle) = self.get(locale) {
			return Ok(bundle);
		}

		let _guard = self.fetch_lock.lock().await;
		if let Some(bundle) = self.get(locale) {
			return Ok(bundle);
		}

		match self.source.fetch(locale).await {
			Ok(bundle) => {
				info!(%locale, keys = bundle.len(), "loaded translations");
				Ok(self.insert(locale, bundle))
			}
			Err(err) => {
				warn!(%locale, error = %err, "failed to load translations");

				if locale != DEFAULT_LOCALE && !self.is_loaded(DEFAULT_LOCALE) {
					match self.source.fetch(DEFAULT_LOCALE).await {
						Ok(bundle) => {
							info!(locale = %DEFAULT_LOCALE, keys = bundle.len(), "loaded fallback translations");
							self.insert(DEFAULT_LOCALE, bundle);
						}
						Err(fallback_err) => {
							debug!(
								locale = %DEFAULT_LOCALE,
								error = %fallback_err,
								"fallback translations unavailable"
							);
						}
					}
				}

				Err(err)
			}
		}
	}

	fn insert(&self, locale: Locale, bundle: Bundle) -> Arc<Bundle> {
		let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(cache.entry(locale).or_insert_with(|| Arc::new(bundle)))
	}
}

impl std::fmt::Debug for BundleLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BundleLoader")
			.field("loaded", &self.loaded_locales())
			.finish_non_exhaustive()
	}
}
