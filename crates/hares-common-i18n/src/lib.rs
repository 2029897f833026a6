// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization (i18n) support for the Hares back office.
//!
//! Translations live in one JSON bundle per locale (`i18n/en.json`,
//! `i18n/ar.json`) with nested objects and string leaves. Arabic is a
//! right-to-left locale; switching to it flips the document direction and
//! pulls in the RTL stylesheet.
//!
//! # Key Naming Convention
//!
//! Keys are dot-delimited paths into the bundle, grouped by page:
//!
//! - `common.` for shared actions and labels
//! - `navigation.` for sidebar entries
//! - `<page>.` (`customers.`, `loans.`, ...) for page titles and subtitles
//!
//! # Example
//!
//! ```
//! use hares_common_dom::Document;
//! use hares_common_i18n::{FixedLanguage, I18n, Locale, StaticBundleSource};
//!
//! # tokio_test::block_on(async {
//! let i18n = I18n::builder(StaticBundleSource::builtin())
//!     .language_source(FixedLanguage::new("ar-EG"))
//!     .build();
//!
//! let mut document = Document::new();
//! assert_eq!(i18n.init(&mut document).await, Locale::Ar);
//! assert!(i18n.is_rtl());
//!
//! let welcome = i18n.t_fmt("dashboard.welcome", &[("name", "Sara")]);
//! assert!(welcome.contains("Sara"));
//! # });
//! ```

mod bundle;
mod controller;
mod detect;
mod error;
mod interpolate;
mod loader;
mod locale;
mod page;
mod source;
mod store;
mod translate;

pub use bundle::Bundle;
pub use controller::{
	I18n, I18nBuilder, LocaleChanged, SubscriptionId, RTL_CLASS, RTL_STYLESHEET_ID,
};
pub use detect::{detect, FixedLanguage, LanguageSource, SystemLanguage};
pub use error::{LoadError, Result};
pub use interpolate::{interpolate, interpolations, Interpolations, TranslateOptions};
pub use loader::BundleLoader;
pub use locale::{
	available_locales, is_rtl, is_supported, locale_info, Direction, Locale, LocaleInfo,
	UnsupportedLocale,
};
pub use page::PageLocation;
pub use source::{BundleSource, FsBundleSource, HttpBundleSource, StaticBundleSource};
pub use store::{LocaleStore, LOCALE_KEY};
pub use translate::{
	translate_page, Translator, ARIA_ATTR, KEY_ATTR, OPTIONS_ATTR, PLACEHOLDER_ATTR, TITLE_ATTR,
};

pub use locale::{DEFAULT_LOCALE, LOCALES};
