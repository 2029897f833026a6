// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale metadata and direction support.

use std::fmt;
use std::str::FromStr;

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Left-to-right (English)
	Ltr,
	/// Right-to-left (Arabic)
	Rtl,
}

impl Direction {
	/// Returns the HTML `dir` attribute value.
	pub fn as_html_dir(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}

	pub fn is_rtl(&self) -> bool {
		matches!(self, Direction::Rtl)
	}
}

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
	En,
	Ar,
}

/// Default locale used as fallback.
pub const DEFAULT_LOCALE: Locale = Locale::En;

impl Default for Locale {
	fn default() -> Self {
		DEFAULT_LOCALE
	}
}

impl Locale {
	pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

	pub fn as_str(&self) -> &'static str {
		self.info().code
	}

	pub fn info(&self) -> &'static LocaleInfo {
		match self {
			Locale::En => &LOCALES[0],
			Locale::Ar => &LOCALES[1],
		}
	}

	pub fn direction(&self) -> Direction {
		self.info().direction
	}

	pub fn is_rtl(&self) -> bool {
		self.direction().is_rtl()
	}

	/// Parses an exact locale code (`"en"`, `"ar"`).
	pub fn from_code(code: &str) -> Option<Locale> {
		Locale::ALL.into_iter().find(|l| l.as_str() == code)
	}

	/// Parses a language tag such as `ar-EG` or `en_US` by its primary subtag.
	pub fn from_language_tag(tag: &str) -> Option<Locale> {
		let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
		Locale::from_code(&primary)
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
	type Err = UnsupportedLocale;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Locale::from_code(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
	}
}

/// Metadata about a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	/// ISO 639-1 language code
	pub code: &'static str,
	/// English name of the language
	pub name: &'static str,
	/// Native name of the language
	pub native_name: &'static str,
	/// Text direction
	pub direction: Direction,
	/// Short label shown on the language switcher
	pub switcher_label: &'static str,
}

/// All supported locales.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "en",
		name: "English",
		native_name: "English",
		direction: Direction::Ltr,
		switcher_label: "EN",
	},
	LocaleInfo {
		code: "ar",
		name: "Arabic",
		native_name: "العربية",
		direction: Direction::Rtl,
		switcher_label: "ع",
	},
];

/// Get metadata for a locale code.
///
/// Returns `None` if the locale is not supported.
pub fn locale_info(code: &str) -> Option<&'static LocaleInfo> {
	LOCALES.iter().find(|l| l.code == code)
}

/// Check if a locale code uses right-to-left text direction.
///
/// Returns `false` for unsupported locales.
pub fn is_rtl(code: &str) -> bool {
	locale_info(code).is_some_and(|info| info.direction == Direction::Rtl)
}

/// Check if a locale code is supported.
pub fn is_supported(code: &str) -> bool {
	locale_info(code).is_some()
}

pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}
