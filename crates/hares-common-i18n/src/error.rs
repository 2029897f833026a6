// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::locale::Locale;

/// Reasons a translation bundle could not be obtained.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("failed to fetch {locale} bundle from {url}: {source}")]
	Network {
		locale: Locale,
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("fetching {locale} bundle from {url} returned {status}")]
	Status {
		locale: Locale,
		url: String,
		status: StatusCode,
	},

	#[error("failed to read {locale} bundle at {}: {source}", path.display())]
	Io {
		locale: Locale,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("{locale} bundle is not valid JSON: {source}")]
	Parse {
		locale: Locale,
		#[source]
		source: serde_json::Error,
	},

	#[error("{locale} bundle is not a JSON object")]
	NotAnObject { locale: Locale },

	#[error("no bundle available for {locale}")]
	Missing { locale: Locale },

	#[error("invalid bundle base URL: {0}")]
	InvalidUrl(#[from] url::ParseError),
}

impl LoadError {
	/// The locale whose bundle failed, when known.
	pub fn locale(&self) -> Option<Locale> {
		match self {
			LoadError::Network { locale, .. }
			| LoadError::Status { locale, .. }
			| LoadError::Io { locale, .. }
			| LoadError::Parse { locale, .. }
			| LoadError::NotAnObject { locale }
			| LoadError::Missing { locale } => Some(*locale),
			LoadError::InvalidUrl(_) => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, LoadError>;
