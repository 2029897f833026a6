// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key-value store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `None` selects the per-user data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
	pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfigLayer {
	#[serde(default)]
	pub path: Option<PathBuf>,
}

impl StorageConfigLayer {
	pub fn merge(&mut self, other: StorageConfigLayer) {
		if other.path.is_some() {
			self.path = other.path;
		}
	}

	pub fn finalize(self) -> StorageConfig {
		StorageConfig { path: self.path }
	}
}
