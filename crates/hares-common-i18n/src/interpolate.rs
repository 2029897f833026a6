// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `{placeholder}` substitution and per-element translation options.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::warn;

use crate::locale::{Locale, DEFAULT_LOCALE};

/// Placeholder name → replacement value.
pub type Interpolations = BTreeMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid")
});

/// Replaces each `{name}` with its value in a single pass.
///
/// Placeholders without a value are left verbatim, and substituted values are
/// never scanned again.
pub fn interpolate<'a>(message: &'a str, values: &Interpolations) -> Cow<'a, str> {
	if values.is_empty() {
		return Cow::Borrowed(message);
	}

	PLACEHOLDER.replace_all(message, |caps: &Captures<'_>| {
		match values.get(&caps[1]) {
			Some(value) => value.clone(),
			None => caps[0].to_string(),
		}
	})
}

/// Builds [`Interpolations`] from `(name, value)` pairs.
pub fn interpolations<K, V, I>(pairs: I) -> Interpolations
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	pairs
		.into_iter()
		.map(|(k, v)| (k.into(), v.into()))
		.collect()
}

/// Options attached to a single translation call.
///
/// `locale` overrides the controller's current locale for this lookup only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
	pub locale: Option<Locale>,
	pub values: Interpolations,
}

impl TranslateOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_values(values: Interpolations) -> Self {
		Self {
			locale: None,
			values,
		}
	}

	pub fn locale(mut self, locale: Locale) -> Self {
		self.locale = Some(locale);
		self
	}

	pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.values.insert(name.into(), value.into());
		self
	}

	/// Reads options from a `data-i18n-opt` attribute value.
	///
	/// Malformed JSON or a non-object yields empty options with a warning.
	/// Strings are taken as-is; numbers and booleans are stringified; `null`,
	/// arrays and objects are skipped. A `locale` entry that is not a supported
	/// code resolves against the default locale.
	pub fn from_attribute(raw: &str) -> Self {
		let map = match serde_json::from_str::<Value>(raw) {
			Ok(Value::Object(map)) => map,
			Ok(_) => {
				warn!(options = raw, "translation options are not a JSON object");
				return Self::default();
			}
			Err(e) => {
				warn!(options = raw, error = %e, "malformed translation options");
				return Self::default();
			}
		};

		let mut options = Self::default();
		for (name, value) in map {
			let text = match value {
				Value::String(s) => s,
				Value::Number(n) => n.to_string(),
				Value::Bool(b) => b.to_string(),
				Value::Null | Value::Array(_) | Value::Object(_) => continue,
			};

			if name == "locale" {
				options.locale = Some(Locale::from_code(&text).unwrap_or(DEFAULT_LOCALE));
			} else {
				options.values.insert(name, text);
			}
		}
		options
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_substitutes_known_placeholders() {
		let values = interpolations([("name", "Sara"), ("count", "3")]);
		assert_eq!(
			interpolate("Hi {name}, you have {count} loans", &values),
			"Hi Sara, you have 3 loans"
		);
	}

	#[test]
	fn test_unknown_placeholders_stay_verbatim() {
		assert_eq!(
			interpolate("Hello {name}", &Interpolations::new()),
			"Hello {name}"
		);
		let values = interpolations([("other", "x")]);
		assert_eq!(interpolate("Hello {name}", &values), "Hello {name}");
	}

	#[test]
	fn test_repeated_placeholder() {
		let values = interpolations([("x", "ab")]);
		assert_eq!(interpolate("{x}-{x}", &values), "ab-ab");
	}

	#[test]
	fn test_single_pass() {
		let values = interpolations([("a", "{b}"), ("b", "nope")]);
		assert_eq!(interpolate("{a}", &values), "{b}");
	}

	#[test]
	fn test_non_word_braces_untouched() {
		let values = interpolations([("a b", "x"), ("", "y")]);
		assert_eq!(interpolate("{a b} {} {-}", &values), "{a b} {} {-}");
	}

	#[test]
	fn test_options_from_attribute() {
		let options =
			TranslateOptions::from_attribute(r#"{"name":"Omar","count":5,"ok":true,"skip":null}"#);
		assert_eq!(options.locale, None);
		assert_eq!(
			options.values,
			interpolations([("name", "Omar"), ("count", "5"), ("ok", "true")])
		);
	}

	#[test]
	fn test_options_locale_override() {
		let options = TranslateOptions::from_attribute(r#"{"locale":"ar","x":"1"}"#);
		assert_eq!(options.locale, Some(Locale::Ar));
		assert!(!options.values.contains_key("locale"));

		let options = TranslateOptions::from_attribute(r#"{"locale":"fr"}"#);
		assert_eq!(options.locale, Some(Locale::En));
	}

	#[test]
	fn test_malformed_options_are_empty() {
		assert_eq!(TranslateOptions::from_attribute("{oops"), TranslateOptions::default());
		assert_eq!(TranslateOptions::from_attribute("[1]"), TranslateOptions::default());
		assert_eq!(TranslateOptions::from_attribute(""), TranslateOptions::default());
	}

	proptest! {
		#[test]
		fn text_without_braces_is_unchanged(s in "[^{}]*", v in "[a-z]{0,8}") {
			let values = interpolations([("name", v)]);
			prop_assert_eq!(interpolate(&s, &values), s.as_str());
		}

		#[test]
		fn substituted_value_appears(name in "[A-Za-z_][A-Za-z0-9_]{0,10}", v in "[^{}]{0,16}") {
			let message = format!("<{{{name}}}>");
			let values = interpolations([(name, v.clone())]);
			prop_assert_eq!(interpolate(&message, &values).into_owned(), format!("<{v}>"));
		}
	}
}
