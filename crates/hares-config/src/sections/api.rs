// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! REST API client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// API configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
	pub base_url: String,
	pub timeout_secs: u64,
	/// Attempts for idempotent requests, including the first.
	pub max_retries: u32,
}

impl ApiConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		ApiConfigLayer::default().finalize()
	}
}

/// API configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	#[serde(default)]
	pub max_retries: Option<u32>,
}

impl ApiConfigLayer {
	pub fn merge(&mut self, other: ApiConfigLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
		if other.max_retries.is_some() {
			self.max_retries = other.max_retries;
		}
	}

	pub fn finalize(self) -> ApiConfig {
		ApiConfig {
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
			max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
		}
	}
}
