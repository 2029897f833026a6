// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use url::Url;

use crate::locale::Locale;

/// Where the current page sits in the site tree.
///
/// Pages under `/pages/` are one level deep, so bundle and stylesheet paths
/// climb one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
	path: String,
}

impl PageLocation {
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}

	pub fn from_url(url: &Url) -> Self {
		Self::new(url.path())
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn is_nested(&self) -> bool {
		self.path.contains("/pages/")
	}

	/// `../i18n` for nested pages, `./i18n` otherwise.
	pub fn bundle_base(&self) -> &'static str {
		if self.is_nested() {
			"../i18n"
		} else {
			"./i18n"
		}
	}

	/// Relative path of a locale's bundle file.
	pub fn bundle_path(&self, locale: Locale) -> String {
		format!("{}/{}.json", self.bundle_base(), locale)
	}

	/// `href` for the right-to-left stylesheet link.
	pub fn stylesheet_href(&self) -> &'static str {
		if self.is_nested() {
			"../css/rtl.css"
		} else {
			"css/rtl.css"
		}
	}
}

impl Default for PageLocation {
	fn default() -> Self {
		Self::new("/index.html")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_root_page() {
		let page = PageLocation::new("/index.html");
		assert!(!page.is_nested());
		assert_eq!(page.bundle_path(Locale::Ar), "./i18n/ar.json");
		assert_eq!(page.stylesheet_href(), "css/rtl.css");
	}

	#[test]
	fn test_nested_page() {
		let page = PageLocation::new("/app/pages/customers.html");
		assert!(page.is_nested());
		assert_eq!(page.bundle_path(Locale::En), "../i18n/en.json");
		assert_eq!(page.stylesheet_href(), "../css/rtl.css");
	}

	#[test]
	fn test_from_url_ignores_query() {
		let url = Url::parse("https://bo.example.com/pages/loans.html?id=4#x").unwrap();
		let page = PageLocation::from_url(&url);
		assert_eq!(page.path(), "/pages/loans.html");
		assert!(page.is_nested());
	}
}
