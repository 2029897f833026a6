// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wires configuration into the store, the API client and the i18n controller.

use std::sync::Arc;

use hares_api::{ApiClient, ApiError};
use hares_common_http::RetryConfig;
use hares_common_i18n::{
	BundleSource, FixedLanguage, FsBundleSource, HttpBundleSource, I18n, PageLocation,
	StaticBundleSource, LOCALE_KEY,
};
use hares_common_storage::{FileStore, MemoryStore, SharedStore, StorageError};
use hares_config::{BundleLocation, ConfigError, HaresConfig};
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Storage(#[from] StorageError),

	#[error(transparent)]
	Api(#[from] ApiError),

	#[error("HTTP client error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("invalid URL: {0}")]
	Url(#[from] url::ParseError),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("not signed in; run `hares login` first")]
	NotSignedIn,

	#[error("{0}")]
	InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

pub struct App {
	config: HaresConfig,
	store: SharedStore,
}

impl App {
	/// Opens the configured store, or the per-user one.
	pub fn open(config: HaresConfig) -> Result<Self> {
		let store: SharedStore = match &config.storage.path {
			Some(path) => Arc::new(FileStore::new(path.clone())),
			None => Arc::new(FileStore::from_xdg()?),
		};
		Ok(Self::with_store(config, store))
	}

	pub fn with_store(config: HaresConfig, store: SharedStore) -> Self {
		Self { config, store }
	}

	pub fn config(&self) -> &HaresConfig {
		&self.config
	}

	pub fn store(&self) -> &SharedStore {
		&self.store
	}

	pub fn api(&self) -> Result<ApiClient> {
		let retry = RetryConfig {
			max_attempts: self.config.api.max_retries,
			..RetryConfig::default()
		};
		Ok(ApiClient::builder()
			.base_url(&self.config.api.base_url)
			.store(Arc::clone(&self.store))
			.request_timeout(self.config.api.timeout())
			.retry_config(retry)
			.build()?)
	}

	fn bundle_source(&self, page: &PageLocation) -> Result<(Arc<dyn BundleSource>, PageLocation)> {
		Ok(match &self.config.i18n.bundles {
			BundleLocation::Builtin => (Arc::new(StaticBundleSource::builtin()), page.clone()),
			BundleLocation::Directory(dir) => (Arc::new(FsBundleSource::new(dir.clone())), page.clone()),
			BundleLocation::PageUrl(raw) => {
				let url = Url::parse(raw)?;
				let client = hares_common_http::new_client_with_timeout(self.config.api.timeout())?;
				let location = PageLocation::from_url(&url);
				(Arc::new(HttpBundleSource::new(client, url)), location)
			}
		})
	}

	/// Builds a controller for `page`.
	///
	/// `locale_override` takes priority over the stored preference for this
	/// controller only; it is never written back to the durable store.
	pub fn i18n(&self, page: &PageLocation, locale_override: Option<&str>) -> Result<I18n> {
		let (source, page) = self.bundle_source(page)?;

		let store = match locale_override {
			Some(locale) => {
				debug!(locale, "using one-off locale override");
				Arc::new(MemoryStore::with_entries([(LOCALE_KEY, locale)])) as SharedStore
			}
			None => Arc::clone(&self.store),
		};

		let builder = I18n::builder_shared(source).store(store).page(page);
		let builder = match &self.config.i18n.language {
			Some(language) => builder.language_source(FixedLanguage::new(language.clone())),
			None => builder,
		};
		Ok(builder.build())
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use hares_common_dom::Document;
	use hares_common_i18n::Locale;
	use hares_common_storage::KeyValueStore;
	use hares_config::I18nConfig;

	pub(crate) fn test_app() -> App {
		let config = HaresConfig {
			i18n: I18nConfig {
				bundles: BundleLocation::Builtin,
				language: Some("en-US".to_string()),
			},
			..HaresConfig::default()
		};
		App::with_store(config, Arc::new(MemoryStore::new()))
	}

	#[tokio::test]
	async fn test_override_does_not_touch_store() {
		let app = test_app();
		let i18n = app.i18n(&PageLocation::default(), Some("ar")).unwrap();

		assert_eq!(i18n.init(&mut Document::new()).await, Locale::Ar);
		assert_eq!(app.store().get(LOCALE_KEY).unwrap(), None);
	}

	#[tokio::test]
	async fn test_configured_language_is_used_for_detection() {
		let mut app = test_app();
		app.config.i18n.language = Some("ar_EG".to_string());
		let i18n = app.i18n(&PageLocation::default(), None).unwrap();

		assert_eq!(i18n.init(&mut Document::new()).await, Locale::Ar);
		assert_eq!(app.store().get(LOCALE_KEY).unwrap(), Some("ar".to_string()));
	}

	#[tokio::test]
	async fn test_directory_bundles() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("en.json"), r#"{"common":{"app_name":"Hares Dev"}}"#).unwrap();
		let mut app = test_app();
		app.config.i18n.bundles = BundleLocation::Directory(dir.path().to_path_buf());

		let i18n = app.i18n(&PageLocation::default(), None).unwrap();
		i18n.init(&mut Document::new()).await;
		assert_eq!(i18n.t("common.app_name"), "Hares Dev");
	}

	#[test]
	fn test_page_url_sets_location() {
		let mut app = test_app();
		app.config.i18n.bundles =
			BundleLocation::PageUrl("https://app.example.com/pages/loans.html".to_string());

		let i18n = app.i18n(&PageLocation::default(), None).unwrap();
		assert!(i18n.page().is_nested());
	}

	#[test]
	fn test_api_uses_configured_base_url() {
		let mut app = test_app();
		app.config.api.base_url = "https://api.example.com/".to_string();
		let api = app.api().unwrap();
		assert_eq!(api.base_url(), "https://api.example.com");
	}
}
