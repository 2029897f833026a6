// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Places translation bundles are fetched from.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::bundle::Bundle;
use crate::error::{LoadError, Result};
use crate::locale::Locale;
use crate::page::PageLocation;

const EN_JSON: &str = include_str!("../i18n/en.json");
const AR_JSON: &str = include_str!("../i18n/ar.json");

#[async_trait]
pub trait BundleSource: Send + Sync {
	async fn fetch(&self, locale: Locale) -> Result<Bundle>;
}

/// Fetches `<base>/i18n/<locale>.json` relative to the page URL.
#[derive(Debug, Clone)]
pub struct HttpBundleSource {
	client: Client,
	page_url: Url,
	page: PageLocation,
}

impl HttpBundleSource {
	pub fn new(client: Client, page_url: Url) -> Self {
		let page = PageLocation::from_url(&page_url);
		Self {
			client,
			page_url,
			page,
		}
	}

	pub fn page(&self) -> &PageLocation {
		&self.page
	}

	pub fn bundle_url(&self, locale: Locale) -> Result<Url> {
		Ok(self.page_url.join(&self.page.bundle_path(locale))?)
	}
}

#[async_trait]
impl BundleSource for HttpBundleSource {
	async fn fetch(&self, locale: Locale) -> Result<Bundle> {
		let url = self.bundle_url(locale)?;
		debug!(%locale, %url, "fetching translation bundle");

		let response = self
			.client
			.get(url.clone())
			.send()
			.await
			.map_err(|source| LoadError::Network {
				locale,
				url: url.to_string(),
				source,
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(LoadError::Status {
				locale,
				url: url.to_string(),
				status,
			});
		}

		let body = response.text().await.map_err(|source| LoadError::Network {
			locale,
			url: url.to_string(),
			source,
		})?;

		Bundle::parse(locale, &body)
	}
}

/// Reads `<root>/<locale>.json` from disk.
#[derive(Debug, Clone)]
pub struct FsBundleSource {
	root: PathBuf,
}

impl FsBundleSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn path_for(&self, locale: Locale) -> PathBuf {
		self.root.join(format!("{locale}.json"))
	}
}

#[async_trait]
impl BundleSource for FsBundleSource {
	async fn fetch(&self, locale: Locale) -> Result<Bundle> {
		let path = self.path_for(locale);
		debug!(%locale, path = %path.display(), "reading translation bundle");

		let text = tokio::fs::read_to_string(&path)
			.await
			.map_err(|source| LoadError::Io {
				locale,
				path: path.clone(),
				source,
			})?;

		Bundle::parse(locale, &text)
	}
}

/// Bundles held in memory as JSON text.
#[derive(Debug, Clone, Default)]
pub struct StaticBundleSource {
	bundles: HashMap<Locale, Cow<'static, str>>,
}

impl StaticBundleSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// The bundles compiled into this crate.
	pub fn builtin() -> Self {
		Self::new()
			.with_text(Locale::En, EN_JSON)
			.with_text(Locale::Ar, AR_JSON)
	}

	pub fn with_text(mut self, locale: Locale, text: impl Into<Cow<'static, str>>) -> Self {
		self.bundles.insert(locale, text.into());
		self
	}

	pub fn with_value(self, locale: Locale, value: Value) -> Self {
		self.with_text(locale, value.to_string())
	}
}

#[async_trait]
impl BundleSource for StaticBundleSource {
	async fn fetch(&self, locale: Locale) -> Result<Bundle> {
		let text = self
			.bundles
			.get(&locale)
			.ok_or(LoadError::Missing { locale })?;
		Bundle::parse(locale, text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[tokio::test]
	async fn test_http_source_root_page() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/i18n/ar.json"))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(json!({ "common": { "save": "حفظ" } })),
			)
			.expect(1)
			.mount(&server)
			.await;

		let page_url = Url::parse(&format!("{}/index.html", server.uri())).unwrap();
		let source = HttpBundleSource::new(Client::new(), page_url);
		let bundle = source.fetch(Locale::Ar).await.unwrap();

		assert_eq!(bundle.lookup("common.save"), Some("حفظ"));
		assert_eq!(bundle.locale(), Some(Locale::Ar));
	}

	#[tokio::test]
	async fn test_http_source_nested_page_climbs_one_level() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/i18n/en.json"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "a": "b" })))
			.expect(1)
			.mount(&server)
			.await;

		let page_url = Url::parse(&format!("{}/pages/customers.html", server.uri())).unwrap();
		let source = HttpBundleSource::new(Client::new(), page_url);
		assert_eq!(
			source.bundle_url(Locale::En).unwrap().path(),
			"/i18n/en.json"
		);
		assert_eq!(source.fetch(Locale::En).await.unwrap().lookup("a"), Some("b"));
	}

	#[tokio::test]
	async fn test_http_source_status_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&server)
			.await;

		let page_url = Url::parse(&format!("{}/", server.uri())).unwrap();
		let source = HttpBundleSource::new(Client::new(), page_url);
		let err = source.fetch(Locale::Ar).await.unwrap_err();

		match err {
			LoadError::Status { locale, status, .. } => {
				assert_eq!(locale, Locale::Ar);
				assert_eq!(status.as_u16(), 404);
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_http_source_rejects_non_object_body() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_string("\"just a string\""))
			.mount(&server)
			.await;

		let page_url = Url::parse(&format!("{}/", server.uri())).unwrap();
		let source = HttpBundleSource::new(Client::new(), page_url);
		assert!(matches!(
			source.fetch(Locale::En).await,
			Err(LoadError::NotAnObject { .. })
		));
	}

	#[tokio::test]
	async fn test_fs_source_reads_locale_file() {
		let tmp = tempfile::TempDir::new().unwrap();
		std::fs::write(tmp.path().join("ar.json"), r#"{"x":{"y":"ص"}}"#).unwrap();

		let source = FsBundleSource::new(tmp.path());
		assert_eq!(source.fetch(Locale::Ar).await.unwrap().lookup("x.y"), Some("ص"));
		assert!(matches!(
			source.fetch(Locale::En).await,
			Err(LoadError::Io { locale: Locale::En, .. })
		));
	}

	#[tokio::test]
	async fn test_static_source() {
		let source = StaticBundleSource::new().with_value(Locale::En, json!({ "k": "v" }));
		assert_eq!(source.fetch(Locale::En).await.unwrap().lookup("k"), Some("v"));
		assert!(matches!(
			source.fetch(Locale::Ar).await,
			Err(LoadError::Missing { locale: Locale::Ar })
		));
	}

	#[tokio::test]
	async fn test_builtin_bundles_share_keys() {
		let source = StaticBundleSource::builtin();
		let en = source.fetch(Locale::En).await.unwrap();
		let ar = source.fetch(Locale::Ar).await.unwrap();

		assert_eq!(en.lookup("navigation.dashboard"), Some("Dashboard"));
		assert!(ar.lookup("navigation.dashboard").is_some());
		assert_eq!(en.len(), ar.len());
	}
}
