// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Applies translations to every marked element of a document.

use hares_common_dom::Document;

use crate::interpolate::TranslateOptions;

/// Element text is replaced with this key's translation.
pub const KEY_ATTR: &str = "data-i18n-key";
/// JSON object of interpolation values for [`KEY_ATTR`].
pub const OPTIONS_ATTR: &str = "data-i18n-opt";
pub const PLACEHOLDER_ATTR: &str = "data-i18n-placeholder";
pub const ARIA_ATTR: &str = "data-i18n-aria";
pub const TITLE_ATTR: &str = "data-i18n-title";

const ATTRIBUTE_MARKERS: [(&str, &str); 3] = [
	(PLACEHOLDER_ATTR, "placeholder"),
	(ARIA_ATTR, "aria-label"),
	(TITLE_ATTR, "title"),
];

/// Anything that turns a key into display text.
pub trait Translator {
	fn translate(&self, key: &str, options: &TranslateOptions) -> String;
}

/// Overwrites the text or target attribute of every marked element.
///
/// Running it twice on an unchanged document gives the same document.
pub fn translate_page<T>(translator: &T, document: &mut Document)
where
	T: Translator + ?Sized,
{
	for id in document.query_by_attribute(KEY_ATTR) {
		let Some(key) = document.attribute(id, KEY_ATTR).map(str::to_owned) else {
			continue;
		};
		let options = document
			.attribute(id, OPTIONS_ATTR)
			.filter(|raw| !raw.trim().is_empty())
			.map(TranslateOptions::from_attribute)
			.unwrap_or_default();

		let text = translator.translate(&key, &options);
		document.set_text_content(id, text);
	}

	let no_options = TranslateOptions::default();
	for (marker, target) in ATTRIBUTE_MARKERS {
		for id in document.query_by_attribute(marker) {
			let Some(key) = document.attribute(id, marker).map(str::to_owned) else {
				continue;
			};
			let text = translator.translate(&key, &no_options);
			document.set_attribute(id, target, text);
		}
	}
}
