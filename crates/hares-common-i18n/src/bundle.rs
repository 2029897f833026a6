// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Nested translation bundles and key lookup.

use serde_json::{Map, Value};

use crate::error::{LoadError, Result};
use crate::locale::Locale;

/// A locale's full key tree, as read from `<locale>.json`.
///
/// Leaves are strings; any depth of nesting is allowed. Non-string leaves are
/// kept but never resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
	locale: Option<Locale>,
	root: Map<String, Value>,
}

impl Bundle {
	/// An empty bundle; every lookup misses.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn parse(locale: Locale, text: &str) -> Result<Self> {
		let value: Value =
			serde_json::from_str(text).map_err(|source| LoadError::Parse { locale, source })?;
		Self::from_value(locale, value)
	}

	pub fn from_value(locale: Locale, value: Value) -> Result<Self> {
		match value {
			Value::Object(root) => Ok(Self {
				locale: Some(locale),
				root,
			}),
			_ => Err(LoadError::NotAnObject { locale }),
		}
	}

	pub fn locale(&self) -> Option<Locale> {
		self.locale
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_empty()
	}

	/// Walks a dot-delimited key.
	///
	/// Returns `None` when a segment is missing, an intermediate is not an
	/// object, or the leaf is not a string. An empty string is a hit.
	pub fn lookup(&self, key: &str) -> Option<&str> {
		let mut segments = key.split('.');
		let first = segments.next()?;
		let mut current = self.root.get(first)?;

		for segment in segments {
			current = current.as_object()?.get(segment)?;
		}

		current.as_str()
	}

	/// Number of string leaves in the tree.
	pub fn len(&self) -> usize {
		fn count(value: &Value) -> usize {
			match value {
				Value::String(_) => 1,
				Value::Object(map) => map.values().map(count).sum(),
				_ => 0,
			}
		}
		self.root.values().map(count).sum()
	}
}
