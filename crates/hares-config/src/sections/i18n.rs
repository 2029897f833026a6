// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation bundle and language configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where translation bundles are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BundleLocation {
	/// Bundles compiled into the binary.
	#[default]
	Builtin,
	/// `<dir>/<locale>.json` on disk.
	Directory(PathBuf),
	/// Fetched relative to a page URL, the way a browser would.
	PageUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct I18nConfig {
	pub bundles: BundleLocation,
	/// Overrides the operating system language during detection.
	pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nConfigLayer {
	#[serde(default)]
	pub bundle_dir: Option<PathBuf>,
	#[serde(default)]
	pub page_url: Option<String>,
	#[serde(default)]
	pub language: Option<String>,
}

impl I18nConfigLayer {
	pub fn merge(&mut self, other: I18nConfigLayer) {
		if other.bundle_dir.is_some() {
			self.bundle_dir = other.bundle_dir;
		}
		if other.page_url.is_some() {
			self.page_url = other.page_url;
		}
		if other.language.is_some() {
			self.language = other.language;
		}
	}

	/// A page URL wins over a bundle directory when both are set.
	pub fn finalize(self) -> I18nConfig {
		let bundles = match (self.page_url, self.bundle_dir) {
			(Some(url), _) => BundleLocation::PageUrl(url),
			(None, Some(dir)) => BundleLocation::Directory(dir),
			(None, None) => BundleLocation::Builtin,
		};
		I18nConfig {
			bundles,
			language: self.language,
		}
	}
}
