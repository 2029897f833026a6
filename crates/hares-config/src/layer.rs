// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::sections::{ApiConfigLayer, I18nConfigLayer, LoggingConfigLayer, StorageConfigLayer};

/// One source's partial view of the configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaresConfigLayer {
	#[serde(default)]
	pub api: Option<ApiConfigLayer>,
	#[serde(default)]
	pub i18n: Option<I18nConfigLayer>,
	#[serde(default)]
	pub storage: Option<StorageConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

fn merge_section<T: Default>(slot: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	if let Some(other) = other {
		merge(slot.get_or_insert_with(T::default), other);
	}
}

impl HaresConfigLayer {
	/// Overlays `other` on top of `self`; fields `other` leaves unset are kept.
	pub fn merge(&mut self, other: HaresConfigLayer) {
		merge_section(&mut self.api, other.api, ApiConfigLayer::merge);
		merge_section(&mut self.i18n, other.i18n, I18nConfigLayer::merge);
		merge_section(&mut self.storage, other.storage, StorageConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}
