// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the Hares client.
//!
//! Sources are applied lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`~/.config/hares/config.toml` or an explicit path)
//! 3. Environment variables (`HARES_*`)
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! timeout_secs = 30
//!
//! [i18n]
//! bundle_dir = "/srv/hares/i18n"
//! language = "ar"
//!
//! [logging]
//! level = "hares=debug"
//! json = false
//! ```

mod error;
mod layer;
mod sections;
mod sources;

pub use error::ConfigError;
pub use layer::HaresConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};
use url::Url;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HaresConfig {
	pub api: ApiConfig,
	pub i18n: I18nConfig,
	pub storage: StorageConfig,
	pub logging: LoggingConfig,
}

/// Loads defaults, the user config file and the environment.
pub fn load_config() -> Result<HaresConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::user()?),
		Box::new(EnvSource::new()),
	])
}

/// Like [`load_config`] but with an explicit config file.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<HaresConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	])
}

/// Merges `sources` in precedence order and validates the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<HaresConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = HaresConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

fn finalize(layer: HaresConfigLayer) -> Result<HaresConfig, ConfigError> {
	let config = HaresConfig {
		api: layer.api.unwrap_or_default().finalize(),
		i18n: layer.i18n.unwrap_or_default().finalize(),
		storage: layer.storage.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
	};

	validate(&config)?;

	info!(
		api_base_url = %config.api.base_url,
		bundles = ?config.i18n.bundles,
		language = ?config.i18n.language,
		"configuration loaded"
	);
	Ok(config)
}

fn validate(config: &HaresConfig) -> Result<(), ConfigError> {
	let base = Url::parse(&config.api.base_url)
		.map_err(|e| ConfigError::invalid_value("api.base_url", e.to_string()))?;
	if !matches!(base.scheme(), "http" | "https") {
		return Err(ConfigError::invalid_value(
			"api.base_url",
			format!("unsupported scheme '{}'", base.scheme()),
		));
	}

	if config.api.timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"api.timeout_secs must be greater than zero".to_string(),
		));
	}
	if config.api.max_retries == 0 {
		return Err(ConfigError::Validation(
			"api.max_retries must be at least 1".to_string(),
		));
	}

	if let BundleLocation::PageUrl(page) = &config.i18n.bundles {
		Url::parse(page).map_err(|e| ConfigError::invalid_value("i18n.page_url", e.to_string()))?;
	}

	Ok(())
}
